use std::collections::VecDeque;

use eframe::egui::{Pos2, Vec2, pos2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::ModelGraph;
use crate::rdf::NodeId;

use super::{Layout, Positions};

const MAX_EPOCH: u32 = 2000;
const RADIUS_CONSTANT_TIME: u32 = 100;
const INITIAL_RADIUS: u32 = 5;
const MIN_RADIUS: u32 = 1;
const INITIAL_ADAPTION: f32 = 0.90;
const MIN_ADAPTION: f32 = 0.0;
const COOLING_FACTOR: f32 = 2.0;
const SAMPLE_OFFSET: f32 = 10.0;
const EPOCHS_PER_STEP: u32 = 40;

/// Inverted self-organizing map layout.
///
/// Each epoch draws a random point inside the bounds, picks the vertex
/// closest to it and pulls that vertex and its neighbourhood (within the
/// current radius, ignoring edge direction) toward the point. The pull
/// halves with every hop and the adaption factor cools exponentially.
pub struct IsomLayout {
    graph: ModelGraph,
    size: Option<Vec2>,
    positions: Positions,
    neighbors: Vec<Vec<NodeId>>,
    rng: StdRng,
    seed: u64,
    epoch: u32,
    radius: u32,
    adaption: f32,
    hops: Vec<Option<u32>>,
    queue: VecDeque<NodeId>,
}

impl IsomLayout {
    pub fn new(graph: ModelGraph, seed: u64) -> Self {
        let neighbors = graph
            .vertices()
            .map(|vertex| graph.neighbors(vertex))
            .collect();
        let vertex_count = graph.vertex_count();

        Self {
            positions: Positions::with_capacity(vertex_count),
            graph,
            size: None,
            neighbors,
            rng: StdRng::seed_from_u64(seed),
            seed,
            epoch: 1,
            radius: INITIAL_RADIUS,
            adaption: INITIAL_ADAPTION,
            hops: vec![None; vertex_count],
            queue: VecDeque::new(),
        }
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn adaption(&self) -> f32 {
        self.adaption
    }

    fn closest_vertex(&self, point: Pos2) -> Option<NodeId> {
        self.graph
            .vertices()
            .filter_map(|vertex| {
                self.positions
                    .get(vertex)
                    .map(|position| (vertex, position.distance_sq(point)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(vertex, _)| vertex)
    }

    fn run_epoch(&mut self, size: Vec2) {
        let point = pos2(
            SAMPLE_OFFSET + self.rng.gen_range(0.0..size.x.max(f32::EPSILON)),
            SAMPLE_OFFSET + self.rng.gen_range(0.0..size.y.max(f32::EPSILON)),
        );

        if let Some(winner) = self.closest_vertex(point) {
            self.adjust_neighbourhood(winner, point);
        }
        self.update_parameters();
    }

    fn adjust_neighbourhood(&mut self, winner: NodeId, point: Pos2) {
        self.hops.iter_mut().for_each(|hops| *hops = None);
        self.queue.clear();

        self.hops[winner.index()] = Some(0);
        self.queue.push_back(winner);

        while let Some(current) = self.queue.pop_front() {
            let distance = self.hops[current.index()].unwrap_or(0);
            if let Some(position) = self.positions.get(current) {
                let factor = self.adaption / 2f32.powi(distance as i32);
                self.positions
                    .set(current, position + (point - position) * factor);
            }

            if distance >= self.radius {
                continue;
            }

            for neighbor in &self.neighbors[current.index()] {
                let slot = &mut self.hops[neighbor.index()];
                if slot.is_none() {
                    *slot = Some(distance + 1);
                    self.queue.push_back(*neighbor);
                }
            }
        }
    }

    fn update_parameters(&mut self) {
        self.epoch += 1;
        let factor = (-COOLING_FACTOR * (self.epoch as f32 / MAX_EPOCH as f32)).exp();
        self.adaption = (factor * INITIAL_ADAPTION).max(MIN_ADAPTION);
        if self.radius > MIN_RADIUS && self.epoch % RADIUS_CONSTANT_TIME == 0 {
            self.radius -= 1;
        }
    }
}

impl Layout for IsomLayout {
    fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    fn initialize(&mut self) {
        let Some(size) = self.size else {
            return;
        };

        self.rng = StdRng::seed_from_u64(self.seed);
        self.epoch = 1;
        self.radius = INITIAL_RADIUS;
        self.adaption = INITIAL_ADAPTION;

        for vertex in self.graph.vertices() {
            let position = pos2(
                self.rng.gen_range(0.0..size.x.max(f32::EPSILON)),
                self.rng.gen_range(0.0..size.y.max(f32::EPSILON)),
            );
            self.positions.set(vertex, position);
        }
    }

    fn size(&self) -> Option<Vec2> {
        self.size
    }

    fn set_size(&mut self, size: Vec2) {
        self.size = Some(size);
        self.initialize();
    }

    fn position(&self, vertex: NodeId) -> Option<Pos2> {
        self.positions.get(vertex)
    }

    fn set_position(&mut self, vertex: NodeId, position: Pos2) {
        self.positions.set(vertex, position);
    }

    fn step(&mut self) -> bool {
        let Some(size) = self.size else {
            return false;
        };

        for _ in 0..EPOCHS_PER_STEP {
            if self.is_done() {
                break;
            }
            self.run_epoch(size);
        }
        !self.is_done()
    }

    fn is_done(&self) -> bool {
        self.size.is_none() || self.epoch >= MAX_EPOCH
    }
}
