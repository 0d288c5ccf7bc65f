// Run queries between random node pairs.
// Checks that the stepped search agrees with the batch search and that
// the reported distances match the lengths of the returned paths.

#[macro_use]
extern crate route_optimizer;
use route_optimizer::{algo::*, cli::CliErr, datastr::graph::*, import::load_csv_dir, report::*};
use std::{env, error::Error, path::Path, time::Duration};

use rand::prelude::*;

fn main() -> Result<(), Box<dyn Error>> {
    let _reporter = enable_reporting("random_queries");

    let mut args = env::args().skip(1);
    let arg = &args.next().ok_or(CliErr("No graph directory arg given"))?;
    let path = Path::new(arg);
    let num_queries = args.next().map(|arg| arg.parse::<usize>()).transpose()?.unwrap_or(100);
    let seed = args.next().map(|arg| arg.parse::<u64>()).transpose()?.unwrap_or(42);

    report!("num_queries", num_queries);
    report!("seed", seed);

    let network = report_time("loading road network", || load_csv_dir(path))?;
    let graph = network.graph();
    report!("graph", { "num_nodes": graph.num_nodes(), "num_arcs": graph.num_arcs() });

    let mut rng = StdRng::seed_from_u64(seed);
    let mut total_query_time = Duration::ZERO;
    let mut num_found = 0;

    let timer = Timer::new();
    let mut queries_ctxt = push_collection_context("queries".to_string());
    for _ in 0..num_queries {
        let _query_ctxt = queries_ctxt.push_collection_item();

        let from = rng.gen_range(0..graph.num_nodes()) as NodeId;
        let to = rng.gen_range(0..graph.num_nodes()) as NodeId;
        report!("from", from);
        report!("to", to);

        let (route, time) = measure(|| find_path(graph, from, to));
        let route = route?;
        total_query_time += time;
        report!("running_time_ms", time.as_secs_f64() * 1000.0);
        report!("found", route.is_found());

        let outcome = SteppedDijkstra::new(graph, Query { from, to }, ParallelEdgePolicy::default())?.run_to_completion();
        if outcome.route != route {
            return Err(CliErr("stepped search and batch search disagree").into());
        }

        if route.is_found() {
            num_found += 1;
            report!("distance", route.distance);
            report!("num_nodes_on_path", route.path.len());

            let length = path_length(graph, &route.path, ParallelEdgePolicy::default()).ok_or(CliErr("route uses a missing arc"))?;
            if (length - route.distance).abs() > 1e-9 * route.distance.max(1.0) {
                return Err(CliErr("route length does not match reported distance").into());
            }
        }
    }
    drop(queries_ctxt);
    report!("total_time_ms", timer.get_passed_ms());

    report!("num_found", num_found);
    if num_queries > 0 {
        let avg_ms = total_query_time.as_secs_f64() * 1000.0 / num_queries as f64;
        eprintln!("{} queries, {} found, avg query time {}ms", num_queries, num_found, avg_ms);
        report!("avg_running_time_ms", avg_ms);
    }

    Ok(())
}
