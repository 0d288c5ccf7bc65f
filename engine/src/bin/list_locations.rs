// Print the named places of a city.

use route_optimizer::{import::load_locations_csv, locations::locations_for_city};
use std::{env, error::Error, path::Path};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let city = args.next().unwrap_or_else(|| "chandigarh".to_string());
    let mut locations = locations_for_city(&city)?;

    // additional places from a `name,lat,lon` file
    if let Some(arg) = args.next() {
        for name in locations.merge(load_locations_csv(Path::new(&arg), &city)?) {
            eprintln!("skipping {} - outside of {}", name, city);
        }
    }

    println!("\nAvailable locations in {}:", locations.city());
    print!("{}", locations.format_table());

    Ok(())
}
