use scolacard_core::{paginate, select_for_print, PageSlot, PrintConfig, Selection, Student};

fn roster(size: usize) -> Vec<Student> {
    (0..size)
        .map(|index| {
            Student::new(
                format!("Prenom{index}"),
                format!("NOM{index}"),
                format!("2024-TG-{index:03}"),
                "Terminale C",
                "2025-2026",
            )
        })
        .collect()
}

#[test]
fn default_config_is_a4_portrait_two_by_five() {
    let config = PrintConfig::default();
    assert_eq!(config.capacity(), 10);
    assert!((config.card_width_mm() - 92.5).abs() < 1e-9);
    assert!((config.card_height_mm() - 52.4).abs() < 1e-9);
}

#[test]
fn twenty_three_records_fill_three_pages_of_10_10_3() {
    let students = roster(23);
    let pages = paginate(&students, &PrintConfig::default());

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].card_count(), 10);
    assert_eq!(pages[1].card_count(), 10);
    assert_eq!(pages[2].card_count(), 3);
    assert_eq!(pages[2].placeholder_count(), 7);
}

#[test]
fn page_count_is_ceiling_of_size_over_capacity() {
    let config = PrintConfig::default();
    for size in [1, 9, 10, 11, 20, 21, 100] {
        let students = roster(size);
        let pages = paginate(&students, &config);
        assert_eq!(pages.len(), size.div_ceil(config.capacity()), "size {size}");
        for page in &pages {
            assert!(page.card_count() <= config.capacity());
            assert_eq!(page.slots().len(), config.capacity());
        }
    }
}

#[test]
fn concatenated_pages_preserve_roster_order() {
    let students = roster(23);
    let pages = paginate(&students, &PrintConfig::default());

    let flattened: Vec<_> = pages
        .iter()
        .flat_map(|page| page.cards().map(|student| student.id))
        .collect();
    let original: Vec<_> = students.iter().map(|student| student.id).collect();
    assert_eq!(flattened, original);
}

#[test]
fn empty_roster_yields_no_pages() {
    let pages = paginate(&[], &PrintConfig::default());
    assert!(pages.is_empty());
}

#[test]
fn placeholders_only_trail_real_cards() {
    let students = roster(4);
    let pages = paginate(&students, &PrintConfig::default());
    assert_eq!(pages.len(), 1);

    let slots = pages[0].slots();
    let first_placeholder = slots
        .iter()
        .position(|slot| matches!(slot, PageSlot::Placeholder))
        .unwrap();
    assert_eq!(first_placeholder, 4);
    assert!(slots[first_placeholder..]
        .iter()
        .all(|slot| matches!(slot, PageSlot::Placeholder)));
}

#[test]
fn empty_selection_prints_everyone() {
    let students = roster(5);
    let targets = select_for_print(&students, &Selection::new());
    assert_eq!(targets.len(), 5);
}

#[test]
fn non_empty_selection_filters_in_roster_order() {
    let students = roster(5);
    let mut selection = Selection::new();
    selection.toggle(students[3].id);
    selection.toggle(students[1].id);

    let targets = select_for_print(&students, &selection);
    let ids: Vec<_> = targets.iter().map(|student| student.id).collect();
    assert_eq!(ids, vec![students[1].id, students[3].id]);
}

#[test]
fn selection_toggle_and_clear() {
    let students = roster(2);
    let mut selection = Selection::new();

    assert!(selection.toggle(students[0].id));
    assert!(selection.contains(students[0].id));
    assert!(!selection.toggle(students[0].id));
    assert!(selection.is_empty());

    selection.toggle(students[0].id);
    selection.toggle(students[1].id);
    assert_eq!(selection.len(), 2);
    selection.clear();
    assert!(selection.is_empty());
}
