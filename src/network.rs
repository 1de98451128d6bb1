use crate::airport::AirportId;
use crate::error::AirlineError;
use crate::flight::{Flight, FlightId};
use crate::pricing::dynamic_price;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::ops::Add;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub flight: FlightId,
    pub to: AirportId,
    pub minutes: u64,
    /// Fare at the moment the flight entered the graph.
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route<W> {
    pub total: W,
    pub path: Vec<AirportId>,
}

/// Directed multigraph of the flight network, one edge per flight.
#[derive(Default)]
pub struct RouteGraph {
    adjacency: HashMap<AirportId, Vec<Edge>>,
    origins: HashMap<FlightId, AirportId>,
}

impl RouteGraph {
    pub fn new() -> RouteGraph {
        RouteGraph::default()
    }

    /// Adds (or replaces) the edge for `flight`, pricing it at its current fare.
    pub fn add_flight(&mut self, flight: &Flight) {
        self.remove_flight(flight.id);
        self.adjacency
            .entry(flight.origin.clone())
            .or_default()
            .push(Edge {
                flight: flight.id,
                to: flight.destination.clone(),
                minutes: flight.duration(),
                price: dynamic_price(flight),
            });
        self.origins.insert(flight.id, flight.origin.clone());
    }

    /// Removes only the edge belonging to `flight`; parallel flights stay.
    pub fn remove_flight(&mut self, flight: FlightId) -> bool {
        let Some(origin) = self.origins.remove(&flight) else {
            return false;
        };
        if let Some(edges) = self.adjacency.get_mut(&origin) {
            edges.retain(|e| e.flight != flight);
            if edges.is_empty() {
                self.adjacency.remove(&origin);
            }
        }
        true
    }

    pub fn edges_from(&self, airport: &AirportId) -> &[Edge] {
        self.adjacency.get(airport).map(|e| e.as_slice()).unwrap_or(&[])
    }

    pub fn shortest_by_time(&self, from: &AirportId, to: &AirportId) -> Result<Route<u64>, AirlineError> {
        self.shortest(from, to, |e| e.minutes)
    }

    pub fn shortest_by_price(&self, from: &AirportId, to: &AirportId) -> Result<Route<f64>, AirlineError> {
        self.shortest(from, to, |e| e.price)
    }

    /// Dijkstra over non-negative weights. Only strict improvements relax a
    /// node, so the first-discovered predecessor wins among equal paths.
    fn shortest<W, F>(&self, from: &AirportId, to: &AirportId, weight: F) -> Result<Route<W>, AirlineError>
    where
        W: Copy + Default + PartialOrd + Add<Output = W>,
        F: Fn(&Edge) -> W,
    {
        let mut dist: HashMap<AirportId, W> = HashMap::new();
        let mut prev: HashMap<AirportId, AirportId> = HashMap::new();
        let mut frontier = BinaryHeap::new();
        let mut seq = 0usize;

        dist.insert(from.clone(), W::default());
        frontier.push(Frontier { cost: W::default(), seq, node: from.clone() });

        while let Some(Frontier { cost, node, .. }) = frontier.pop() {
            if node == *to {
                break;
            }
            // stale entry
            if dist.get(&node).is_some_and(|best| cost > *best) {
                continue;
            }
            for edge in self.edges_from(&node) {
                let candidate = cost + weight(edge);
                let improves = dist.get(&edge.to).map_or(true, |best| candidate < *best);
                if improves {
                    dist.insert(edge.to.clone(), candidate);
                    prev.insert(edge.to.clone(), node.clone());
                    seq += 1;
                    frontier.push(Frontier { cost: candidate, seq, node: edge.to.clone() });
                }
            }
        }

        let total = *dist.get(to).ok_or_else(|| AirlineError::NoRouteFound {
            from: from.clone(),
            to: to.clone(),
        })?;

        let mut path = vec![to.clone()];
        let mut cur = to;
        while cur != from {
            match prev.get(cur) {
                Some(p) => {
                    path.push(p.clone());
                    cur = p;
                }
                None => break,
            }
        }
        path.reverse();
        debug!(%from, %to, hops = path.len() - 1, "route found");
        Ok(Route { total, path })
    }
}

/// Min-heap entry: lowest cost first, then earliest pushed.
struct Frontier<W> {
    cost: W,
    seq: usize,
    node: AirportId,
}

impl<W: PartialOrd> Ord for Frontier<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<W: PartialOrd> PartialOrd for Frontier<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> PartialEq for Frontier<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for Frontier<W> {}
