use gridpath_core::{Coord, Grid};

use crate::error::SearchError;
use crate::search::{NodeRef, Path, PathSearch, SearchOutcome};
use crate::traits::AstarPather;

impl PathSearch {
    /// Search the shortest path between the endpoints of `grid`-shaped
    /// cells, using `grid` for adjacency and obstacles.
    ///
    /// `start` and `goal` are optional so that callers can pass the grid's
    /// current markers straight through: if either is `None` the call fails
    /// with [`SearchError::MissingEndpoints`] before any search record is
    /// touched. The engine resizes itself to `grid` when needed.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: Option<Coord>,
        goal: Option<Coord>,
    ) -> Result<SearchOutcome, SearchError> {
        let (Some(start), Some(goal)) = (start, goal) else {
            return Err(SearchError::MissingEndpoints);
        };
        if self.size() != (grid.rows(), grid.cols()) {
            self.set_size(grid.rows(), grid.cols());
        }
        self.astar(grid, start, goal)
    }

    /// Compute the shortest path from `start` to `goal` using A*.
    ///
    /// Among open cells with equal `f`, the one that entered the open set
    /// first is expanded first, and neighbours are visited in the order the
    /// pather yields them. Together these fix which of several shortest
    /// paths is returned.
    pub fn astar<P: AstarPather>(
        &mut self,
        pather: &P,
        start: Coord,
        goal: Coord,
    ) -> Result<SearchOutcome, SearchError> {
        let start_idx = self.idx(start).ok_or(SearchError::OutOfBounds(start))?;
        let goal_idx = self.idx(goal).ok_or(SearchError::OutOfBounds(goal))?;

        self.expanded = 0;
        if start_idx == goal_idx {
            return Ok(SearchOutcome::Found(Path::from_cells(vec![start])));
        }

        self.bump_generation();
        let cur_gen = self.generation;
        self.open.clear();
        self.next_seq = 0;

        log::debug!("A* search {start} -> {goal} (generation {cur_gen})");

        // Initialise the start node.
        {
            let h = pather.estimate(start, goal);
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = h;
            node.f = h;
            node.parent = usize::MAX;
            node.seq = 0;
            node.generation = cur_gen;
            node.open = true;
        }
        self.next_seq = 1;
        self.open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip entries superseded by a relaxation or already closed.
            {
                let node = &self.nodes[ci];
                if node.generation != cur_gen || !node.open || node.f != current.f {
                    continue;
                }
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            self.expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = self.coord(ci);
            log::trace!("expand {current_point} g={current_g} f={}", current.f);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    // Closed, or already open with an equal or better cost.
                    if !n.open || tentative_g >= n.g {
                        continue;
                    }
                    // Relaxation: g, f and the back-link move together. The
                    // cell keeps its first-insertion order.
                    n.g = tentative_g;
                    n.f = tentative_g + n.h;
                    n.parent = ci;
                } else {
                    let h = pather.estimate(np, goal);
                    n.generation = cur_gen;
                    n.g = tentative_g;
                    n.h = h;
                    n.f = tentative_g + h;
                    n.parent = ci;
                    n.seq = self.next_seq;
                    n.open = true;
                    self.next_seq += 1;
                }

                self.open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    seq: n.seq,
                });
            }
        };

        self.nbuf = nbuf;
        self.open.clear();

        if !found {
            log::debug!(
                "A* search {start} -> {goal}: no path after {} expansions",
                self.expanded
            );
            return Ok(SearchOutcome::NotFound);
        }

        // Reconstruct path.
        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            cells.push(self.coord(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        log::debug!(
            "A* search {start} -> {goal}: {} cells after {} expansions",
            cells.len(),
            self.expanded
        );
        Ok(SearchOutcome::Found(Path::from_cells(cells)))
    }
}

/// Search between the grid's own start and goal markers with a fresh engine.
pub fn find_path(grid: &Grid) -> Result<SearchOutcome, SearchError> {
    find_path_between(grid, grid.start(), grid.goal())
}

/// Search between explicit endpoints with a fresh engine.
pub fn find_path_between(
    grid: &Grid,
    start: Option<Coord>,
    goal: Option<Coord>,
) -> Result<SearchOutcome, SearchError> {
    PathSearch::for_grid(grid).find_path(grid, start, goal)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use gridpath_core::CellKind;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::traits::Pather;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn path_of(grid: &Grid) -> Path {
        find_path(grid)
            .expect("endpoints are set")
            .into_path()
            .expect("goal is reachable")
    }

    /// Reference shortest distance by breadth-first search.
    fn bfs_distance(grid: &Grid, start: Coord, goal: Coord) -> Option<usize> {
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::new();
        dist[grid.index(start)?] = 0;
        queue.push_back(start);
        let mut buf = Vec::new();
        while let Some(cur) = queue.pop_front() {
            let d = dist[grid.index(cur)?];
            if cur == goal {
                return Some(d);
            }
            buf.clear();
            grid.neighbors(cur, &mut buf);
            for &n in &buf {
                let i = grid.index(n)?;
                if dist[i] == usize::MAX {
                    dist[i] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid(grid: &Grid, path: &Path, start: Coord, goal: Coord) {
        assert_eq!(path.start(), start);
        assert_eq!(path.goal(), goal);
        assert!(path.is_connected(), "path has a gap: {path:?}");
        for &p in path {
            assert!(grid.contains(p));
            assert!(!grid.is_obstacle(p), "path crosses obstacle at {p}");
        }
    }

    #[test]
    fn open_grid_path_has_manhattan_length() {
        let mut g = Grid::new(5, 5);
        g.set_start(c(0, 0)).unwrap();
        g.set_goal(c(4, 4)).unwrap();
        let path = path_of(&g);
        assert_eq!(path.len(), 9);
        assert_valid(&g, &path, c(0, 0), c(4, 4));
    }

    #[test]
    fn open_grid_any_endpoints() {
        let g = Grid::new(7, 6);
        let mut ps = PathSearch::for_grid(&g);
        for s in g.coords().step_by(5) {
            for t in g.coords().step_by(7) {
                let out = ps.find_path(&g, Some(s), Some(t)).unwrap();
                let path = out.path().unwrap();
                assert_eq!(path.len(), s.manhattan(t) as usize + 1);
                assert_valid(&g, path, s, t);
            }
        }
    }

    #[test]
    fn detours_through_bottom_row() {
        let g = Grid::from_ascii(
            "
            S#.
            .#.
            ..G
            ",
        )
        .unwrap();
        let path = path_of(&g);
        assert_eq!(
            path.cells(),
            &[c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)]
        );
    }

    #[test]
    fn enclosed_goal_is_not_found() {
        let g = Grid::from_ascii(
            "
            S#.
            #G#
            .#.
            ",
        )
        .unwrap();
        assert_eq!(find_path(&g), Ok(SearchOutcome::NotFound));
    }

    #[test]
    fn walled_off_start_is_not_found() {
        let g = Grid::from_ascii(
            "
            S#...
            ##...
            ....G
            ",
        )
        .unwrap();
        let mut ps = PathSearch::for_grid(&g);
        assert_eq!(
            ps.find_path(&g, g.start(), g.goal()),
            Ok(SearchOutcome::NotFound)
        );
        assert_eq!(ps.expanded(), 1);
    }

    #[test]
    fn missing_endpoints_touch_nothing() {
        let mut g = Grid::new(4, 4);
        let mut ps = PathSearch::for_grid(&g);
        assert_eq!(
            ps.find_path(&g, g.start(), g.goal()),
            Err(SearchError::MissingEndpoints)
        );
        g.set_start(c(0, 0)).unwrap();
        assert_eq!(
            ps.find_path(&g, g.start(), g.goal()),
            Err(SearchError::MissingEndpoints)
        );
        assert_eq!(
            ps.find_path(&g, None, Some(c(1, 1))),
            Err(SearchError::MissingEndpoints)
        );
        assert_eq!(ps.generation, 0);
        assert!(ps.nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn missing_endpoints_is_not_not_found() {
        let g = Grid::new(3, 3);
        let err = find_path(&g).unwrap_err();
        assert_eq!(err, SearchError::MissingEndpoints);
        assert_eq!(
            err.to_string(),
            "start and goal must both be set before searching"
        );
    }

    #[test]
    fn out_of_bounds_endpoint() {
        let g = Grid::new(3, 3);
        assert_eq!(
            find_path_between(&g, Some(c(0, 0)), Some(c(3, 0))),
            Err(SearchError::OutOfBounds(c(3, 0)))
        );
        assert_eq!(
            find_path_between(&g, Some(c(-1, 0)), Some(c(2, 2))),
            Err(SearchError::OutOfBounds(c(-1, 0)))
        );
    }

    #[test]
    fn same_start_and_goal() {
        let g = Grid::new(3, 3);
        let out = find_path_between(&g, Some(c(1, 1)), Some(c(1, 1))).unwrap();
        assert_eq!(out.path().unwrap().cells(), &[c(1, 1)]);
    }

    #[test]
    fn obstacle_goal_is_unreachable() {
        let mut g = Grid::new(3, 3);
        g.set_obstacle(c(2, 2), true).unwrap();
        assert_eq!(
            find_path_between(&g, Some(c(0, 0)), Some(c(2, 2))),
            Ok(SearchOutcome::NotFound)
        );
    }

    #[test]
    fn ties_follow_neighbor_and_insertion_order() {
        // Every monotone path is shortest here. Down is tried before right
        // and f never changes on an open grid, so the earliest-inserted
        // frontier cell wins each time: straight down, then right.
        let mut g = Grid::new(3, 3);
        g.set_start(c(0, 0)).unwrap();
        g.set_goal(c(2, 2)).unwrap();
        let path = path_of(&g);
        assert_eq!(
            path.cells(),
            &[c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)]
        );

        // Mirrored goal: up is tried before right.
        let mut g = Grid::new(3, 3);
        g.set_start(c(2, 0)).unwrap();
        g.set_goal(c(0, 2)).unwrap();
        let path = path_of(&g);
        assert_eq!(
            path.cells(),
            &[c(2, 0), c(1, 0), c(0, 0), c(0, 1), c(0, 2)]
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let g = Grid::from_ascii(
            "
            S.....
            .##.#.
            ...#..
            .#...G
            ",
        )
        .unwrap();
        let mut ps = PathSearch::for_grid(&g);
        let first = ps.find_path(&g, g.start(), g.goal()).unwrap();
        let second = ps.find_path(&g, g.start(), g.goal()).unwrap();
        assert!(first.is_found());
        assert_eq!(first, second);
        assert_eq!(first, find_path(&g).unwrap());
    }

    #[test]
    fn earlier_runs_do_not_leak() {
        // Run on an open grid first so every record is populated, then wall
        // off the goal: the stale records must not produce a path.
        let mut g = Grid::new(4, 4);
        g.set_start(c(0, 0)).unwrap();
        g.set_goal(c(3, 3)).unwrap();
        let mut ps = PathSearch::for_grid(&g);
        assert!(ps.find_path(&g, g.start(), g.goal()).unwrap().is_found());

        g.set_obstacle(c(2, 3), true).unwrap();
        g.set_obstacle(c(3, 2), true).unwrap();
        assert_eq!(
            ps.find_path(&g, g.start(), g.goal()),
            Ok(SearchOutcome::NotFound)
        );

        g.set_obstacle(c(3, 2), false).unwrap();
        let path = ps
            .find_path(&g, g.start(), g.goal())
            .unwrap()
            .into_path()
            .unwrap();
        assert_valid(&g, &path, c(0, 0), c(3, 3));
        assert!(path.contains(c(3, 2)));
    }

    #[test]
    fn engine_follows_grid_resizes() {
        let mut ps = PathSearch::new(2, 2);
        let mut g = Grid::new(6, 9);
        g.set_start(c(5, 0)).unwrap();
        g.set_goal(c(0, 8)).unwrap();
        let out = ps.find_path(&g, g.start(), g.goal()).unwrap();
        assert_eq!(ps.size(), (6, 9));
        assert_eq!(out.path().unwrap().len(), 14);
    }

    #[test]
    fn random_grids_match_bfs() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut ps = PathSearch::new(20, 20);
        for _ in 0..200 {
            let mut g = Grid::new(20, 20);
            for p in g.coords().collect::<Vec<_>>() {
                if rng.random_bool(0.3) {
                    g.set_obstacle(p, true).unwrap();
                }
            }
            let s = c(rng.random_range(0..20), rng.random_range(0..20));
            let mut t = s;
            while t == s {
                t = c(rng.random_range(0..20), rng.random_range(0..20));
            }
            g.set_start(s).unwrap();
            g.set_goal(t).unwrap();
            assert_eq!(g.kind(s), Some(CellKind::Start));

            let out = ps.find_path(&g, g.start(), g.goal()).unwrap();
            match (bfs_distance(&g, s, t), out.path()) {
                (Some(d), Some(path)) => {
                    assert_eq!(path.cost(), d, "suboptimal path on\n{g}");
                    assert_valid(&g, path, s, t);
                }
                (None, None) => {}
                (expected, got) => panic!("bfs {expected:?} vs astar {got:?} on\n{g}"),
            }
        }
    }

    /// Pather that forbids a column, to exercise the generic entry point.
    struct NoColumn<'a> {
        grid: &'a Grid,
        col: i32,
    }

    impl Pather for NoColumn<'_> {
        fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
            self.grid.neighbors(p, buf);
            buf.retain(|n| n.col != self.col);
        }
    }

    impl AstarPather for NoColumn<'_> {
        fn estimate(&self, from: Coord, to: Coord) -> i32 {
            from.manhattan(to)
        }
    }

    #[test]
    fn custom_pather() {
        let g = Grid::new(3, 3);
        let mut ps = PathSearch::for_grid(&g);
        let pather = NoColumn { grid: &g, col: 1 };
        assert_eq!(
            ps.astar(&pather, c(0, 0), c(0, 2)),
            Ok(SearchOutcome::NotFound)
        );
        let open = NoColumn { grid: &g, col: 5 };
        let out = ps.astar(&open, c(0, 0), c(0, 2)).unwrap();
        assert_eq!(out.path().unwrap().len(), 3);
    }
}
