// Utility binary to plot the progress of dijkstras algorithm as an SVG file.
// Every settled node becomes a fragment in settle order, the final route is drawn last.

use route_optimizer::{
    algo::QueryProgress,
    cli::CliErr,
    datastr::{graph::*, road_network::Coordinate},
    import::load_csv_dir,
    locations::locations_for_city,
    session::RoutingSession,
};
use std::{env, error::Error, path::Path};

const MAX_ANIMATED_STEPS: usize = 500;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let arg = &args.next().ok_or(CliErr("No directory arg given"))?;
    let path = Path::new(arg);
    let from = args.next().ok_or(CliErr("No start location arg given"))?;
    let to = args.next().ok_or(CliErr("No destination arg given"))?;
    let city = args.next().unwrap_or_else(|| "chandigarh".to_string());

    let session = RoutingSession::new(load_csv_dir(path)?, locations_for_city(&city)?);
    let network = session.network();
    let graph = session.graph();

    let coords: Vec<Coordinate> = (0..graph.num_nodes() as NodeId).map(|node| network.coordinate(node)).collect();
    let min_lat = coords.iter().map(|c| c.lat).fold(f64::INFINITY, f64::min);
    let max_lat = coords.iter().map(|c| c.lat).fold(f64::NEG_INFINITY, f64::max);
    let min_lng = coords.iter().map(|c| c.lng).fold(f64::INFINITY, f64::min);
    let max_lng = coords.iter().map(|c| c.lng).fold(f64::NEG_INFINITY, f64::max);

    let line = |class: &str, a: NodeId, b: NodeId| {
        let (a, b) = (coords[a as usize], coords[b as usize]);
        println!("<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" class=\"{}\" />", a.lng, a.lat, b.lng, b.lat, class);
    };

    println!("<svg version=\"1.1\" xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" viewBox=\"{} {} {} {}\" style=\"transform: scale(1,-1);\" preserveAspectRatio=\"none\">", min_lng, min_lat, max_lng - min_lng, max_lat - min_lat);
    println!("<g>");
    for node in 0..graph.num_nodes() as NodeId {
        line("node", node, node);
        for link in graph.link_iter(node) {
            line("arc", node, link.node);
        }
    }
    println!("</g>");

    let (_, _, search) = session.stepped_search(&from, &to)?;

    let mut counter = 0;
    for progress in search {
        match progress {
            QueryProgress::Settled(step) => {
                counter += 1;
                print!("<g class=\"settled fragment\"");
                if counter <= MAX_ANIMATED_STEPS {
                    print!(" data-autoslide=\"25\"");
                }
                println!(">");
                line("node", step.node, step.node);
                for link in graph.link_iter(step.node) {
                    line("arc", step.node, link.node);
                }
                println!("</g>");
            }
            QueryProgress::Done(outcome) => {
                match outcome.error() {
                    Some(error) => eprintln!("{} after settling {} nodes", error, outcome.num_settled),
                    None => eprintln!("distance {} after settling {} nodes", outcome.route.distance, outcome.num_settled),
                }

                println!("<g class=\"route fragment\">");
                for arc in outcome.route.path.windows(2) {
                    line("route", arc[0], arc[1]);
                }
                println!("</g>");
            }
        }
    }

    println!("</svg>");

    Ok(())
}
