use super::showroom;
use crate::{favourites::FavouriteSet, vehicle::VehicleId};

#[test]
fn seeded_from_catalog_flags() {
    let favourites = FavouriteSet::seed(&showroom());

    assert_eq!(
        favourites.iter().collect::<Vec<_>>(),
        vec![VehicleId::new(0), VehicleId::new(3)]
    );
    assert_eq!(favourites.len(), 2);
}

#[test]
fn double_toggle_is_a_no_op() {
    let catalog = showroom();
    let seeded = FavouriteSet::seed(&catalog);

    for id in (0..catalog.len() + 2).map(VehicleId::new) {
        let mut favourites = seeded.clone();
        let before = favourites.contains(id);

        assert_eq!(favourites.toggle(id), !before);
        assert_eq!(favourites.contains(id), !before);
        assert_eq!(favourites.toggle(id), before);
        assert_eq!(favourites, seeded);
    }
}

#[test]
fn independent_of_source_flags_after_seeding() {
    let catalog = showroom();
    let mut favourites = FavouriteSet::seed(&catalog);
    favourites.toggle(VehicleId::new(0));

    // the flag still says favourite
    assert!(catalog.entries()[0].vehicle.favourite);
    assert!(!favourites.contains(VehicleId::new(0)));
    assert!(favourites.contains(VehicleId::new(3)));
}

#[test]
fn empty_by_default() {
    assert!(FavouriteSet::new().is_empty());
}
