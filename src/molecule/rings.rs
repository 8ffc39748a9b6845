//! Ring perception: smallest ring through each bond.

use std::collections::VecDeque;

/// For every bond, the size of the smallest ring containing it.
///
/// Bridges (bonds whose removal disconnects their endpoints) are never on a
/// ring and are found in one linear pass. For every other bond `a-b` the
/// ring size is the shortest `a`→`b` path avoiding the bond, plus the bond
/// itself; that search only walks non-bridge bonds.
pub(crate) fn smallest_rings(
    bonds: &[(usize, usize)],
    neighbors: &[Vec<usize>],
    incident: &[Vec<usize>],
) -> Vec<Option<usize>> {
    let bridges = find_bridges(bonds.len(), neighbors, incident);
    let mut search = DetourSearch::new(neighbors.len());

    bonds
        .iter()
        .enumerate()
        .map(|(bond, &(a, b))| {
            if a == b || bridges[bond] {
                return None;
            }
            search
                .run(bond, a, b, neighbors, incident, &bridges)
                .map(|path| path + 1)
        })
        .collect()
}

/// One frame of the iterative depth-first walk in [`find_bridges`].
struct Frame {
    atom: usize,
    /// Bond used to reach `atom`; `usize::MAX` for a root.
    via: usize,
    /// Next position in `atom`'s adjacency list.
    next: usize,
}

/// Bridge flags per bond (Tarjan low-link, iterative). Parallel bonds
/// between the same atoms are never bridges because the walk skips the
/// entering bond, not the parent atom.
fn find_bridges(
    bond_count: usize,
    neighbors: &[Vec<usize>],
    incident: &[Vec<usize>],
) -> Vec<bool> {
    let n = neighbors.len();
    let mut order = vec![usize::MAX; n];
    let mut low = vec![0; n];
    let mut bridges = vec![false; bond_count];
    let mut stack: Vec<Frame> = Vec::new();
    let mut clock = 0;

    for root in 0..n {
        if order[root] != usize::MAX {
            continue;
        }
        order[root] = clock;
        low[root] = clock;
        clock += 1;
        stack.push(Frame {
            atom: root,
            via: usize::MAX,
            next: 0,
        });

        while let Some(top) = stack.last_mut() {
            let cur = top.atom;
            if let Some(&next) = neighbors[cur].get(top.next) {
                let bond = incident[cur][top.next];
                top.next += 1;
                if bond == top.via {
                    continue;
                }
                if order[next] == usize::MAX {
                    order[next] = clock;
                    low[next] = clock;
                    clock += 1;
                    stack.push(Frame {
                        atom: next,
                        via: bond,
                        next: 0,
                    });
                } else {
                    low[cur] = low[cur].min(order[next]);
                }
            } else {
                let via = top.via;
                let _ = stack.pop();
                if let Some(parent) = stack.last() {
                    let p = parent.atom;
                    low[p] = low[p].min(low[cur]);
                    if low[cur] > order[p] {
                        bridges[via] = true;
                    }
                }
            }
        }
    }
    bridges
}

/// Breadth-first scratch space reused across bonds.
struct DetourSearch {
    dist: Vec<usize>,
    queue: VecDeque<usize>,
    touched: Vec<usize>,
}

impl DetourSearch {
    fn new(atoms: usize) -> Self {
        Self {
            dist: vec![usize::MAX; atoms],
            queue: VecDeque::new(),
            touched: Vec::new(),
        }
    }

    /// Path length from `a` to `b` that avoids `skip` and every bridge.
    fn run(
        &mut self,
        skip: usize,
        a: usize,
        b: usize,
        neighbors: &[Vec<usize>],
        incident: &[Vec<usize>],
        bridges: &[bool],
    ) -> Option<usize> {
        let found = self.walk(skip, a, b, neighbors, incident, bridges);
        for &i in &self.touched {
            self.dist[i] = usize::MAX;
        }
        self.touched.clear();
        self.queue.clear();
        found
    }

    fn walk(
        &mut self,
        skip: usize,
        a: usize,
        b: usize,
        neighbors: &[Vec<usize>],
        incident: &[Vec<usize>],
        bridges: &[bool],
    ) -> Option<usize> {
        self.dist[a] = 0;
        self.touched.push(a);
        self.queue.push_back(a);
        while let Some(cur) = self.queue.pop_front() {
            for (&next, &via) in neighbors[cur].iter().zip(&incident[cur]) {
                if via == skip || bridges[via] || self.dist[next] != usize::MAX {
                    continue;
                }
                self.dist[next] = self.dist[cur] + 1;
                self.touched.push(next);
                if next == b {
                    return Some(self.dist[next]);
                }
                self.queue.push_back(next);
            }
        }
        None
    }
}
