use super::{ford_and_bmw, record, showroom};
use crate::{
    filter::FilterSelection,
    options::{available_makes, available_models},
    vehicle::Catalog,
};

#[test]
fn unrestricted_options_keep_first_seen_order() {
    let catalog = showroom();
    let selection = FilterSelection::default();

    assert_eq!(
        available_makes(&catalog, &selection),
        vec!["Toyota", "Ford", "BMW"]
    );
    assert_eq!(
        available_models(&catalog, &selection),
        vec!["C-HR", "Focus", "X3", "Fiesta", "Corolla", "X5"]
    );
}

#[test]
fn each_axis_is_restricted_by_the_other_only() {
    let catalog = showroom();

    let by_make = FilterSelection::default().with_make("Ford");
    assert_eq!(available_models(&catalog, &by_make), vec!["Focus", "Fiesta"]);
    // make itself does not narrow the makes
    assert_eq!(
        available_makes(&catalog, &by_make),
        vec!["Toyota", "Ford", "BMW"]
    );

    let by_model = FilterSelection::default().with_model("X3");
    assert_eq!(available_makes(&catalog, &by_model), vec!["BMW"]);
    assert_eq!(available_models(&catalog, &by_model).len(), 6);
}

#[test]
fn duplicates_are_collapsed() {
    let catalog = Catalog::new(vec![
        record("Ford", "Focus", 1.0),
        record("Ford", "Focus", 2.0),
        record("Audi", "A3", 3.0),
        record("Ford", "Kuga", 4.0),
    ]);
    let selection = FilterSelection::default();

    assert_eq!(available_makes(&catalog, &selection), vec!["Ford", "Audi"]);
    assert_eq!(
        available_models(&catalog, &selection),
        vec!["Focus", "A3", "Kuga"]
    );
}

#[test]
fn no_matches_or_no_data_is_empty() {
    let selection = FilterSelection::default().with_make("Lada");
    assert!(available_models(&ford_and_bmw(), &selection).is_empty());

    let empty = Catalog::default();
    assert!(available_makes(&empty, &FilterSelection::default()).is_empty());
    assert!(available_models(&empty, &FilterSelection::default()).is_empty());
}
