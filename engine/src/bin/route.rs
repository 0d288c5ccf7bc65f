// Plan a route between two named places of a city.
// Prints a summary to stderr and the report as JSON to stdout.

#[macro_use]
extern crate route_optimizer;
use route_optimizer::{
    algo::ParallelEdgePolicy,
    cli::*,
    import::load_csv_dir,
    locations::locations_for_city,
    report::*,
    session::RoutingSession,
};
use std::{env, error::Error, path::Path};

fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("route");

    let (args, options) = split_options(env::args().skip(1));
    let mut args = args.into_iter();

    let arg = &args.next().ok_or(CliErr("No graph directory arg given"))?;
    let path = Path::new(arg);
    let from = args.next().ok_or(CliErr("No start location arg given"))?;
    let to = args.next().ok_or(CliErr("No destination arg given"))?;
    let city = args.next().unwrap_or_else(|| "chandigarh".to_string());
    let policy = option_value(&options, "parallel-edges")
        .map(str::parse::<ParallelEdgePolicy>)
        .transpose()?
        .unwrap_or_default();

    report!("city", city);
    report!("parallel_edges", policy.to_string());

    let locations = locations_for_city(&city)?;
    let network = report_time_with_key("loading road network", "load_time_ms", || load_csv_dir(path))?;
    report!("graph", { "num_nodes": network.num_nodes(), "num_arcs": network.num_arcs() });

    let session = RoutingSession::with_policy(network, locations, policy);

    let planned = {
        let _query_ctxt = push_context("query".to_string());
        report_time_with_key("route query", "running_time_ms", || session.plan_route(&from, &to))?
    };

    report!("from", { "name": planned.from.name, "node": planned.from.node });
    report!("to", { "name": planned.to.name, "node": planned.to.node });
    report!("found", planned.is_found());

    if !planned.is_found() {
        eprintln!("No route found between these locations");
        return Ok(());
    }

    report!("statistics", planned.statistics);
    report!("path", planned.coordinates);

    eprintln!("Route from {} to {}", planned.from.name, planned.to.name);
    eprintln!(
        "Distance: {:.2} km ({:.0} m)",
        planned.statistics.distance_km, planned.statistics.distance_m
    );
    eprintln!(
        "Nodes: {}, segments: {}",
        planned.statistics.num_nodes, planned.statistics.num_segments
    );

    Ok(())
}
