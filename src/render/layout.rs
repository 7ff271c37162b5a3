use crate::graph::edge::EdgeKey;
use crate::graph::node::{NodeId, Position};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

pub const FRAME_WIDTH: f64 = 600.0;
pub const FRAME_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Fruchterman–Reingold, deterministic for a given seed.
    Force { seed: u64, iterations: usize },
    /// Stored node positions; unpinned nodes go on a circle.
    Preset,
}

pub fn force_directed(
    nodes: &[NodeId],
    edges: &[EdgeKey],
    seed: u64,
    iterations: usize,
) -> Vec<Position> {
    let n = nodes.len();
    if n == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = (0..n)
        .map(|_| {
            Position::new(
                rng.gen_range(0.0..FRAME_WIDTH),
                rng.gen_range(0.0..FRAME_HEIGHT),
            )
        })
        .collect::<Vec<_>>();
    let slot = |id: NodeId| nodes.iter().position(|n| *n == id);
    let links = edges
        .iter()
        .filter(|e| e.from() != e.to())
        .filter_map(|e| Some((slot(e.from())?, slot(e.to())?)))
        .collect::<Vec<_>>();

    let k = (FRAME_WIDTH * FRAME_HEIGHT / n as f64).sqrt();
    let mut temperature = FRAME_WIDTH / 10.0;
    let cooling = temperature / (iterations.max(1) as f64);

    for _ in 0..iterations {
        let mut disp = vec![(0.0, 0.0); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (pos[i].x - pos[j].x, pos[i].y - pos[j].y);
                let d = (dx * dx + dy * dy).sqrt().max(0.01);
                let f = k * k / d;
                disp[i].0 += dx / d * f;
                disp[i].1 += dy / d * f;
                disp[j].0 -= dx / d * f;
                disp[j].1 -= dy / d * f;
            }
        }
        for &(a, b) in &links {
            let (dx, dy) = (pos[a].x - pos[b].x, pos[a].y - pos[b].y);
            let d = (dx * dx + dy * dy).sqrt().max(0.01);
            let f = d * d / k;
            disp[a].0 -= dx / d * f;
            disp[a].1 -= dy / d * f;
            disp[b].0 += dx / d * f;
            disp[b].1 += dy / d * f;
        }
        pos.iter_mut().zip(&disp).for_each(|(p, &(dx, dy))| {
            let len = (dx * dx + dy * dy).sqrt().max(0.01);
            let step = len.min(temperature);
            p.x = (p.x + dx / len * step).clamp(0.0, FRAME_WIDTH);
            p.y = (p.y + dy / len * step).clamp(0.0, FRAME_HEIGHT);
        });
        temperature = (temperature - cooling).max(1.0);
    }
    pos
}

pub fn preset(pinned: &[Option<Position>]) -> Vec<Position> {
    let n = pinned.len().max(1) as f64;
    let (cx, cy, r) = (FRAME_WIDTH / 2.0, FRAME_HEIGHT / 2.0, FRAME_HEIGHT / 2.5);
    pinned
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.unwrap_or_else(|| {
                let angle = TAU * i as f64 / n;
                Position::new(cx + r * angle.cos(), cy + r * angle.sin())
            })
        })
        .collect()
}
