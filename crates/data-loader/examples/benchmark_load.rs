use data_loader::{NumericCoercion, SourceResolver, Table};
use std::time::Instant;

fn main() {
    let path = SourceResolver::from_env()
        .resolve()
        .expect("No insurance.csv found (set INS_ABS_PATH or run next to the file)");

    println!("Loading {}...\n", path.display());

    let start = Instant::now();
    let table = Table::load(&path, NumericCoercion::DropRow).expect("Failed to load table");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Columns: {}", table.columns().join(", "));
    println!("Records: {}", table.len());
    println!(
        "\nPerformance: {:.0} records/second",
        table.len() as f64 / elapsed.as_secs_f64()
    );
}
