use landscape::{LandscapeConfig, LandscapeService};

fn main() {
    // Rough 150×150 landscape with the default seeds
    let res = LandscapeService::new()
        .compute(&LandscapeConfig::default())
        .expect("default config is valid");

    // Print the top-left 12×12 corner of the field
    for row in res.field().iter().take(12) {
        for z in row.iter().take(12) {
            print!("{:>7.3} ", z);
        }
        println!();
    }

    // And the walk across it
    println!();
    for (i, p) in res.path().points().iter().enumerate().step_by(20) {
        println!("step {:>3}: x={:>6.3} y={:>6.3} z={:>7.4}", i, p.x, p.y, p.z);
    }
    println!("{:?}", res.diagnostics());
}
