use bevy::math::Vec2;

use super::interpolate::Follower;

/// Ordered chain of followers, each lagging behind its predecessor
#[derive(Debug, Clone)]
pub struct TrailChain {
    nodes: Vec<Follower>,
    factor: f32,
}

impl TrailChain {
    /// Allocates all `length` nodes up front; nothing grows afterwards
    pub fn new(length: usize, factor: f32, rest: Vec2) -> Self {
        TrailChain {
            nodes: vec![Follower::at(rest); length],
            factor,
        }
    }

    /// Advance one tick behind `head`.
    ///
    /// Updates strictly 0..N so node i reads node i-1's value from this tick.
    pub fn advance(&mut self, head: Vec2) {
        let mut leader = head;
        for node in &mut self.nodes {
            leader = node.chase(leader, self.factor);
        }
    }

    pub fn snap_to(&mut self, position: Vec2) {
        for node in &mut self.nodes {
            node.snap_to(position);
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    /// Visual weight of node `index`: 1.0 would be the head, fading toward 0
    pub fn weight(&self, index: usize) -> f32 {
        let count = self.nodes.len() as f32;
        (1.0 - (index as f32 + 1.0) / (count + 1.0)).max(0.0)
    }
}
