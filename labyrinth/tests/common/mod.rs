//! Shared maze builders and invariant checks for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use labyrinth::{Direction, Explorer, MazeFixture, MazeGraph, MemorySession};

/// Fully open `width` x `height` grid named `x,y`; `exit` (if any) is a room without exits.
///
/// Exits are reported in the order up, right, down, left.
pub fn grid(width: i32, height: i32, exit: Option<(i32, i32)>) -> MazeFixture {
    let name = |x: i32, y: i32| format!("{},{}", x, y);
    let mut maze = MazeFixture::new(name(0, 0));
    for y in 0..height {
        for x in 0..width {
            let id = name(x, y);
            if exit == Some((x, y)) {
                maze = maze.room(id, &[]);
                continue;
            }
            let candidates = [
                (Direction::Up, x, y - 1),
                (Direction::Right, x + 1, y),
                (Direction::Down, x, y + 1),
                (Direction::Left, x - 1, y),
            ];
            let targets: Vec<(Direction, String)> = candidates
                .iter()
                .filter(|(_, nx, ny)| *nx >= 0 && *ny >= 0 && *nx < width && *ny < height)
                .map(|(d, nx, ny)| (*d, name(*nx, *ny)))
                .collect();
            let exits: Vec<(Direction, &str)> =
                targets.iter().map(|(d, to)| (*d, to.as_str())).collect();
            maze = maze.room(id, &exits);
        }
    }
    maze
}

/// Every frame key is distinct, the root is the start, and each frame's parent is the frame below.
pub fn assert_stack_is_simple_path(explorer: &Explorer<MemorySession>, start: &str) {
    let stack = explorer.stack();
    if stack.is_empty() {
        return;
    }
    assert_eq!(stack[0].key, start);
    assert!(stack[0].parent.is_none());
    let mut seen = HashSet::new();
    for (i, frame) in stack.iter().enumerate() {
        assert!(seen.insert(frame.key.clone()), "repeated key {}", frame.key);
        if i > 0 {
            assert_eq!(frame.parent.as_deref(), Some(stack[i - 1].key.as_str()));
            let entry = frame.entry.expect("non-root frame has an entry direction");
            assert_eq!(
                explorer.graph().neighbor(&stack[i - 1].key, entry),
                Some(frame.key.as_str())
            );
        }
    }
}

/// For every recorded edge A -d-> B where B lists reverse(d), B -reverse(d)-> A is recorded.
pub fn assert_edges_symmetric(graph: &MazeGraph) {
    for location in graph.locations() {
        for (d, to) in &location.neighbors {
            let Some(dest) = graph.location(to) else {
                continue;
            };
            if dest.available.contains(&d.reverse()) {
                assert_eq!(
                    dest.neighbor(d.reverse()),
                    Some(location.key.as_str()),
                    "{} -{}-> {} has no reverse edge",
                    location.key,
                    d,
                    to
                );
            }
        }
    }
}
