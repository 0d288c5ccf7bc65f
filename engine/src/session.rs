//! Planning routes between named places of a city on a loaded road network.

use crate::algo::*;
use crate::datastr::{graph::*, road_network::*};
use crate::locations::LocationTable;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Unknown location '{0}'")]
    UnknownLocation(String),
    #[error("Location '{name}' ({}, {}) is outside of {city}", coordinate.lat, coordinate.lng)]
    OutOfBounds { name: String, city: String, coordinate: Coordinate },
    #[error("The road network has no nodes")]
    NoNodes,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error("Please select different start and destination locations")]
    SameLocation,
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A named place and the network node closest to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub coordinate: Coordinate,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    pub from: ResolvedLocation,
    pub to: ResolvedLocation,
    pub route: Route,
    pub statistics: RouteStatistics,
    /// Positions of the nodes on the route
    pub coordinates: Vec<Coordinate>,
    /// Average position of the route, `None` when no route was found
    pub center: Option<Coordinate>,
}

impl PlannedRoute {
    /// Places which snap to the same node have no route between them.
    pub fn is_found(&self) -> bool {
        self.route.path.len() >= 2
    }
}

/// A road network together with the places of one city.
/// The network is never modified, so one session can serve any number of queries.
#[derive(Debug, Clone)]
pub struct RoutingSession {
    network: RoadNetwork,
    locations: LocationTable,
    policy: ParallelEdgePolicy,
}

impl RoutingSession {
    pub fn new(network: RoadNetwork, locations: LocationTable) -> RoutingSession {
        Self::with_policy(network, locations, ParallelEdgePolicy::default())
    }

    pub fn with_policy(network: RoadNetwork, locations: LocationTable, policy: ParallelEdgePolicy) -> RoutingSession {
        RoutingSession { network, locations, policy }
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn graph(&self) -> &OwnedGraph {
        self.network.graph()
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn policy(&self) -> ParallelEdgePolicy {
        self.policy
    }

    /// Look up a place by name and snap it to the nearest node.
    pub fn resolve(&self, name: &str) -> Result<ResolvedLocation, ResolveError> {
        let coordinate = self.locations.get(name).ok_or_else(|| ResolveError::UnknownLocation(name.to_string()))?;
        if !self.locations.validate_coordinates(&coordinate) {
            return Err(ResolveError::OutOfBounds {
                name: name.to_string(),
                city: self.locations.city().to_string(),
                coordinate,
            });
        }
        let node = self.network.nearest_node(&coordinate).ok_or(ResolveError::NoNodes)?;

        Ok(ResolvedLocation {
            name: name.to_string(),
            coordinate,
            node,
        })
    }

    fn resolve_pair(&self, from: &str, to: &str) -> Result<(ResolvedLocation, ResolvedLocation), RoutingError> {
        if from == to {
            return Err(RoutingError::SameLocation);
        }
        Ok((self.resolve(from)?, self.resolve(to)?))
    }

    /// Shortest route between two named places.
    /// Places which are not connected yield a planned route which was not found.
    pub fn plan_route(&self, from: &str, to: &str) -> Result<PlannedRoute, RoutingError> {
        let (from, to) = self.resolve_pair(from, to)?;
        let route = find_path_with_policy(self.graph(), from.node, to.node, self.policy)?;

        Ok(PlannedRoute {
            statistics: RouteStatistics::from_route(&route),
            coordinates: self.network.coordinates(&route.path),
            center: self.network.center(&route.path),
            from,
            to,
            route,
        })
    }

    /// A search between two named places which can be advanced one settled node at a time.
    pub fn stepped_search(&self, from: &str, to: &str) -> Result<(ResolvedLocation, ResolvedLocation, SteppedDijkstra<'_, OwnedGraph>), RoutingError> {
        let (from, to) = self.resolve_pair(from, to)?;
        let search = SteppedDijkstra::new(
            self.graph(),
            Query {
                from: from.node,
                to: to.node,
            },
            self.policy,
        )?;
        Ok((from, to, search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::{locations_for_city, CHANDIGARH_BOUNDS};

    // Sector 17 Plaza -> Leisure Valley -> Sector 22 Market, Rock Garden is isolated
    fn session() -> RoutingSession {
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
        RoutingSession::new(network, locations_for_city("chandigarh").unwrap())
    }

    #[test]
    fn plans_routes_between_named_places() {
        let session = session();
        let planned = session.plan_route("Sector 17 Plaza", "Sector 22 Market").unwrap();

        assert!(planned.is_found());
        assert_eq!(planned.from.node, 0);
        assert_eq!(planned.to.node, 2);
        assert_eq!(planned.route.path, vec![0, 1, 2]);
        assert_eq!(planned.route.distance, 2050.0);
        assert_eq!(planned.statistics.num_segments, 2);
        assert_eq!(planned.statistics.distance_km, 2.05);
        assert_eq!(planned.coordinates.len(), 3);
        assert_eq!(planned.coordinates[0], Coordinate::new(30.7411, 76.7807));
        assert!(planned.center.is_some());
    }

    #[test]
    fn unreachable_places_are_not_an_error() {
        let session = session();
        let planned = session.plan_route("Sector 17 Plaza", "Rock Garden").unwrap();

        assert!(!planned.is_found());
        assert_eq!(planned.route.distance, INFINITY);
        assert_eq!(planned.statistics.num_nodes, 0);
        assert!(planned.coordinates.is_empty());
        assert_eq!(planned.center, None);
    }

    #[test]
    fn places_on_the_same_node_have_no_route() {
        let session = session();
        let planned = session.plan_route("Sector 22 Market", "Sector 35 Market").unwrap();

        assert_eq!((planned.from.node, planned.to.node), (2, 2));
        assert_eq!(planned.route.path, vec![2]);
        assert!(!planned.is_found());
        assert_eq!(planned.statistics.num_segments, 0);
    }

    #[test]
    fn invalid_requests_fail_before_searching() {
        let session = session();
        assert_eq!(session.plan_route("Rock Garden", "Rock Garden"), Err(RoutingError::SameLocation));
        assert_eq!(
            session.plan_route("Sector 17 Plaza", "Taj Mahal"),
            Err(RoutingError::Resolve(ResolveError::UnknownLocation("Taj Mahal".to_string())))
        );
        assert_eq!(
            RoutingError::SameLocation.to_string(),
            "Please select different start and destination locations"
        );
    }

    #[test]
    fn places_outside_the_city_are_rejected() {
        let network = session().network().clone();
        let mut locations = LocationTable::new("chandigarh".to_string(), Some(CHANDIGARH_BOUNDS));
        locations.add_location("Golden Temple".to_string(), Coordinate::new(31.6200, 74.8765));
        let session = RoutingSession::new(network, locations);

        assert!(matches!(session.resolve("Golden Temple"), Err(ResolveError::OutOfBounds { .. })));
    }

    #[test]
    fn empty_networks_cannot_resolve_places() {
        let network = RoadNetwork::new(OwnedGraph::from_arcs(0, Vec::new()), Vec::new(), Vec::new(), Vec::new());
        let session = RoutingSession::new(network, locations_for_city("chandigarh").unwrap());
        assert_eq!(session.resolve("Rock Garden"), Err(ResolveError::NoNodes));
    }

    #[test]
    fn stepped_search_ends_with_the_planned_route() {
        let session = session();
        let (from, to, mut search) = session.stepped_search("Sector 17 Plaza", "Sector 22 Market").unwrap();
        assert_eq!((from.node, to.node), (0, 2));

        let outcome = search.run_to_completion();
        let planned = session.plan_route("Sector 17 Plaza", "Sector 22 Market").unwrap();
        assert_eq!(outcome.route, planned.route);
        assert_eq!(search.visited(), &[0, 1, 2]);
    }
}
