#[macro_use]
extern crate rocket;

use std::{
    env,
    error::Error,
    path::{Path, PathBuf},
};

use rocket::{
    figment::{providers::Env, Provider},
    fs::NamedFile,
    http::Status,
    serde::json::Json,
    Build, Rocket, State,
};
use serde::Serialize;

use route_optimizer::{
    algo::{QueryProgress, SearchOutcome},
    cli::CliErr,
    datastr::{graph::NodeId, road_network::Coordinate},
    import::{load_csv_dir, load_locations_csv},
    locations::locations_for_city,
    report::report_time,
    session::{ResolvedLocation, RoutingSession},
};

const DEFAULT_STEP_LIMIT: usize = 1000;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (Status, Json<ErrorResponse>)>;

fn error_response(status: Status, error: impl ToString) -> (Status, Json<ErrorResponse>) {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

#[derive(Debug, Serialize)]
struct LocationResponse {
    name: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    from: ResolvedLocation,
    to: ResolvedLocation,
    distance_m: f64,
    distance_km: f64,
    num_nodes: usize,
    num_segments: usize,
    path: Vec<(f64, f64)>,
    center: Option<Coordinate>,
}

#[derive(Debug, Serialize)]
struct StepResponse {
    node: NodeId,
    lat: f64,
    lng: f64,
    distance: f64,
    num_settled: usize,
    queue_len: usize,
}

#[derive(Debug, Serialize)]
struct OutcomeResponse {
    found: bool,
    distance: Option<f64>,
    path: Vec<(f64, f64)>,
    num_settled: usize,
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct StepsResponse {
    from: ResolvedLocation,
    to: ResolvedLocation,
    steps: Vec<StepResponse>,
    /// `None` if the search was stopped at the step limit
    outcome: Option<OutcomeResponse>,
}

fn lat_lng(coordinates: Vec<Coordinate>) -> Vec<(f64, f64)> {
    coordinates.into_iter().map(|c| (c.lat, c.lng)).collect()
}

#[get("/")]
async fn index() -> Option<NamedFile> {
    NamedFile::open(Path::new("static/index.html")).await.ok()
}

#[get("/<file..>", rank = 10)]
async fn files(file: PathBuf) -> Option<NamedFile> {
    NamedFile::open(Path::new("static/").join(file)).await.ok()
}

#[get("/locations")]
fn list_locations(session: &State<RoutingSession>) -> Json<Vec<LocationResponse>> {
    Json(
        session
            .locations()
            .iter()
            .map(|(name, c)| LocationResponse {
                name: name.to_string(),
                lat: c.lat,
                lng: c.lng,
            })
            .collect(),
    )
}

#[get("/route?<from>&<to>")]
fn plan_route(from: &str, to: &str, session: &State<RoutingSession>) -> ApiResult<RouteResponse> {
    println!("Received Query: {:?} -> {:?}", from, to);
    let planned = report_time("route query", || session.plan_route(from, to)).map_err(|e| error_response(Status::BadRequest, e))?;

    if !planned.is_found() {
        return Err(error_response(Status::NotFound, "No route found between these locations"));
    }

    Ok(Json(RouteResponse {
        distance_m: planned.statistics.distance_m,
        distance_km: planned.statistics.distance_km,
        num_nodes: planned.statistics.num_nodes,
        num_segments: planned.statistics.num_segments,
        path: lat_lng(planned.coordinates),
        center: planned.center,
        from: planned.from,
        to: planned.to,
    }))
}

#[get("/route/steps?<from>&<to>&<limit>")]
fn route_steps(from: &str, to: &str, limit: Option<usize>, session: &State<RoutingSession>) -> ApiResult<StepsResponse> {
    let (from, to, search) = session.stepped_search(from, to).map_err(|e| error_response(Status::BadRequest, e))?;
    let limit = limit.unwrap_or(DEFAULT_STEP_LIMIT);
    let network = session.network();

    let mut steps = Vec::new();
    let mut outcome: Option<SearchOutcome> = None;

    for progress in search {
        match progress {
            QueryProgress::Settled(step) => {
                if steps.len() == limit {
                    break;
                }
                let c = network.coordinate(step.node);
                steps.push(StepResponse {
                    node: step.node,
                    lat: c.lat,
                    lng: c.lng,
                    distance: step.distance,
                    num_settled: step.num_settled,
                    queue_len: step.queue_len,
                });
            }
            QueryProgress::Done(done) => outcome = Some(done),
        }
    }

    let outcome = outcome.map(|outcome| OutcomeResponse {
        found: outcome.is_found(),
        distance: outcome.is_found().then_some(outcome.route.distance),
        path: lat_lng(network.coordinates(&outcome.route.path)),
        num_settled: outcome.num_settled,
        error: outcome.error(),
    });

    Ok(Json(StepsResponse { from, to, steps, outcome }))
}

fn build_rocket<T: Provider>(config: T, session: RoutingSession) -> Rocket<Build> {
    rocket::custom(config)
        .mount("/", routes![index, files, list_locations, plan_route, route_steps])
        .manage(session)
}

fn load_session(args: &[String]) -> Result<RoutingSession, Box<dyn Error>> {
    let arg = args.first().ok_or(CliErr("No graph directory arg given"))?;
    let path = Path::new(arg);
    let city = args.get(1).map(String::as_str).unwrap_or("chandigarh");

    let mut locations = locations_for_city(city)?;
    if let Some(arg) = args.get(2) {
        for name in locations.merge(load_locations_csv(Path::new(arg), city)?) {
            eprintln!("skipping {} - outside of {}", name, city);
        }
    }

    let network = report_time("loading road network", || load_csv_dir(path))?;
    println!("{} nodes, {} arcs, {} locations in {}", network.num_nodes(), network.num_arcs(), locations.len(), city);

    Ok(RoutingSession::new(network, locations))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let session = load_session(&args)?;

    let figment = rocket::Config::figment().merge(("port", 8888)).merge(Env::prefixed("ROCKET_").global());
    rocket::execute(build_rocket(figment, session).launch()).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::{local::blocking::Client, serde::json::Value};
    use route_optimizer::datastr::{graph::OwnedGraph, road_network::RoadNetwork};

    // Sector 17 Plaza -> Leisure Valley -> Sector 22 Market, Rock Garden is isolated
    fn client() -> Client {
        let graph = OwnedGraph::from_arcs(
            4,
            vec![
                (0, 1, Some(850.0)),
                (1, 2, Some(1200.0)),
                (0, 2, Some(2500.0)),
                (2, 0, Some(1900.0)),
            ],
        );
        let network = RoadNetwork::new(
            graph,
            vec![30.7411, 30.7338, 30.7320, 30.7520],
            vec![76.7807, 76.7805, 76.7720, 76.7394],
            vec![17, 18, 22, 99],
        );
        let session = RoutingSession::new(network, locations_for_city("chandigarh").unwrap());
        Client::tracked(build_rocket(rocket::Config::debug_default(), session)).unwrap()
    }

    fn get(client: &Client, uri: &str) -> (Status, Value) {
        let response = client.get(uri).dispatch();
        let status = response.status();
        (status, response.into_json::<Value>().unwrap())
    }

    #[test]
    fn routes_between_connected_places() {
        let client = client();
        let (status, body) = get(&client, "/route?from=Sector%2017%20Plaza&to=Sector%2022%20Market");

        assert_eq!(status, Status::Ok);
        assert_eq!(body["distance_m"], 2050.0);
        assert_eq!(body["num_nodes"], 3);
        assert_eq!(body["num_segments"], 2);
        assert_eq!(body["path"].as_array().unwrap().len(), 3);
        assert_eq!(body["from"]["node"], 0);
        assert_eq!(body["to"]["node"], 2);
    }

    #[test]
    fn missing_routes_are_not_found() {
        let client = client();

        let (status, body) = get(&client, "/route?from=Sector%2017%20Plaza&to=Rock%20Garden");
        assert_eq!(status, Status::NotFound);
        assert_eq!(body["error"], "No route found between these locations");

        // both places snap to the Sector 22 Market node
        let (status, _) = get(&client, "/route?from=Sector%2022%20Market&to=Sector%2035%20Market");
        assert_eq!(status, Status::NotFound);
    }

    #[test]
    fn invalid_route_requests_are_bad_requests() {
        let client = client();

        let (status, body) = get(&client, "/route?from=Rock%20Garden&to=Rock%20Garden");
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error"], "Please select different start and destination locations");

        let (status, _) = get(&client, "/route?from=Rock%20Garden&to=Taj%20Mahal");
        assert_eq!(status, Status::BadRequest);
    }

    #[test]
    fn step_limit_stops_the_search() {
        let client = client();

        let (status, body) = get(&client, "/route/steps?from=Sector%2017%20Plaza&to=Sector%2022%20Market&limit=1");
        assert_eq!(status, Status::Ok);
        assert_eq!(body["steps"].as_array().unwrap().len(), 1);
        assert_eq!(body["steps"][0]["node"], 0);
        assert!(body["outcome"].is_null());

        let (status, body) = get(&client, "/route/steps?from=Sector%2017%20Plaza&to=Sector%2022%20Market");
        assert_eq!(status, Status::Ok);
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
        assert_eq!(body["outcome"]["found"], true);
        assert_eq!(body["outcome"]["distance"], 2050.0);
        assert!(body["outcome"]["error"].is_null());
    }

    #[test]
    fn lists_the_places_of_the_city() {
        let client = client();
        let (status, body) = get(&client, "/locations");

        assert_eq!(status, Status::Ok);
        assert!(body.as_array().unwrap().iter().any(|l| l["name"] == "Rock Garden"));
    }
}
