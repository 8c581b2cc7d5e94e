use std::collections::{BTreeMap, VecDeque};

use crate::graph::ModelGraph;
use crate::rdf::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRow {
    pub subject: String,
    pub average: Option<f64>,
}

impl DistanceRow {
    pub fn closeness(&self) -> Option<f64> {
        self.average
            .filter(|average| *average > 0.0)
            .map(|average| 1.0 / average)
    }
}

/// One row per distinct subject, sorted by subject string.
///
/// Distances follow statement direction. A subject that reaches nothing
/// has no average.
pub fn average_distances(graph: &ModelGraph) -> Vec<DistanceRow> {
    let mut rows = BTreeMap::new();
    let mut hops = vec![None; graph.vertex_count()];
    let mut queue = VecDeque::new();

    for subject in graph.store().subjects() {
        let label = graph.node(subject).to_string();
        if rows.contains_key(&label) {
            continue;
        }
        let average = average_from(graph, subject, &mut hops, &mut queue);
        rows.insert(label, average);
    }

    rows.into_iter()
        .map(|(subject, average)| DistanceRow { subject, average })
        .collect()
}

fn average_from(
    graph: &ModelGraph,
    source: NodeId,
    hops: &mut [Option<u32>],
    queue: &mut VecDeque<NodeId>,
) -> Option<f64> {
    hops.iter_mut().for_each(|slot| *slot = None);
    queue.clear();
    hops[source.index()] = Some(0);
    queue.push_back(source);

    let mut total = 0u64;
    let mut reached = 0u64;
    while let Some(current) = queue.pop_front() {
        let distance = hops[current.index()].unwrap_or(0);
        for next in graph.successors(current) {
            let slot = &mut hops[next.index()];
            if slot.is_none() {
                *slot = Some(distance + 1);
                total += u64::from(distance + 1);
                reached += 1;
                queue.push_back(next);
            }
        }
    }

    (reached > 0).then(|| total as f64 / reached as f64)
}
