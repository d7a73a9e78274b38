use crate::vehicle::*;
use anyhow::Result;
use std::path::Path;

const DATASET: &str = r#"[
    {
        "make": "Toyota",
        "model": "C-HR",
        "engineSize": "1.8L",
        "fuel": "petrol",
        "year": 2022,
        "mileage": 743,
        "auctionDateTime": "2024/04/15 09:00:00",
        "startingBid": 17000,
        "favourite": true
    },
    {
        "make": "Ford",
        "model": "Focus",
        "engineSize": "1.0L",
        "fuel": "petrol",
        "year": 2019,
        "mileage": 42100,
        "auctionDateTime": "2024/04/16 10:30:00",
        "startingBid": 8500.5
    }
]"#;

#[test]
fn ids_are_source_positions() -> Result<()> {
    let catalog = Catalog::from_reader(DATASET.as_bytes())?;

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.entries().iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![VehicleId::new(0), VehicleId::new(1)]
    );

    let focus = &catalog.get(VehicleId::new(1)).expect("present").vehicle;
    assert_eq!(focus.engine_size, "1.0L");
    assert_eq!(focus.starting_bid, 8500.5);
    assert!(!focus.favourite);
    assert!(catalog.get(VehicleId::new(2)).is_none());
    Ok(())
}

#[test]
fn malformed_dataset_is_an_error() {
    assert!(matches!(
        Catalog::from_reader(r#"[{"make": "Ford"}]"#.as_bytes()),
        Err(CatalogError::Json(_))
    ));
    assert!(Catalog::load(Path::new("does/not/exist.json")).is_err());
}

#[test]
fn bundled_sample_loads() -> Result<()> {
    let catalog = Catalog::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data/vehicles.json"))?;

    assert!(!catalog.is_empty());
    Ok(())
}
