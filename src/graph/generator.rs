//! Random graph population.

use super::container::Graph;
use crate::random::fork;
use rand::Rng;

impl Graph {
    /// Replaces the graph's content with `node_count` nodes keyed `"0"`,
    /// `"1"`, ... and random edges, then locks the graph.
    ///
    /// Every node receives a random target degree in `1..=max_neighbours`
    /// and partners are drawn until the target is met or the attempt budget
    /// runs out; no node ever exceeds `max_neighbours` neighbours.
    ///
    /// No-op when the graph is already locked.
    pub fn fill_randomly(&mut self, node_count: usize, max_neighbours: usize) {
        if !self.can_mutate() {
            return;
        }
        self.clear();
        self.max_neighbours = max_neighbours;
        for i in 0..node_count {
            self.add_node(i.to_string());
        }

        if node_count > 1 && max_neighbours > 0 {
            let mut rng = fork(&mut self.random_cycle_mut().rng);
            let cap = max_neighbours.min(node_count - 1);
            let attempt_budget = node_count * 4;

            for i in 0..node_count {
                let target = rng.random_range(1..=cap);
                let mut attempts = 0;
                while self.nodes()[i].degree() < target && attempts < attempt_budget {
                    attempts += 1;
                    let j = rng.random_range(0..node_count);
                    if j == i || self.nodes()[j].degree() >= max_neighbours {
                        continue;
                    }
                    self.connect(i, j);
                }
            }
        }

        self.lock();
    }
}
