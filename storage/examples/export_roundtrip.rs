use landscape::generate_loss_landscape;
use storage::LandscapeStore;
use storage::models::LandscapeRecord;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate the basic 100×100 landscape
    let res = generate_loss_landscape(100)?;
    let record = LandscapeRecord::from(&res);

    let store = LandscapeStore::new(std::env::temp_dir().join("loss_data_roundtrip.json"));

    // Save & read back
    store.save(&record)?;
    let found = store.load()?;
    println!(
        "Round-trip success: z[50][50] = {} (path of {} points)",
        found.z[50][50],
        found.path.len()
    );
    assert_eq!(found, record);

    std::fs::remove_file(store.path())?;
    Ok(())
}
