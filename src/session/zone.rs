//! Drop Zones
//!
//! Closed set of hover targets and the collision classifier that picks one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::OptionId;

/// Where the pointer currently is, structurally
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum DropZone {
    /// Body of a group: dropping here makes the option a member
    GroupBody(OptionId),
    /// Area for root-level options
    UngroupedArea,
    /// Another option's or group header's row, for reordering
    ReorderTarget(OptionId),
    NoTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let width = self.right().min(other.right()) - self.x.max(other.x);
        let height = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if width <= 0.0 || height <= 0.0 {
            0.0
        } else {
            width * height
        }
    }

    /// Overlap relative to the union of both rectangles (0..=1)
    pub fn overlap_ratio(&self, other: &Rect) -> f64 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A registered drop target and its current bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub zone: DropZone,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(zone: DropZone, rect: Rect) -> Self {
        Self { zone, rect }
    }
}

/// Pick the zone under the pointer
///
/// A direct pointer hit wins; among several, the smallest rectangle (the most
/// specific target) wins, ties going to the first registered. Without a
/// pointer hit, the droppable overlapping `dragged` the most wins, so a fast
/// pointer that skipped a thin target still lands somewhere plausible. The
/// reorder target of `skip` (the dragged option) is never returned.
pub fn classify(
    pointer: Option<Point>,
    dragged: Option<&Rect>,
    droppables: &[Droppable],
    skip: Option<&OptionId>,
) -> DropZone {
    let candidates: Vec<&Droppable> = droppables
        .iter()
        .filter(|droppable| match (&droppable.zone, skip) {
            (DropZone::ReorderTarget(id), Some(skip)) => id != skip,
            (DropZone::NoTarget, _) => false,
            _ => true,
        })
        .collect();

    if let Some(pointer) = pointer {
        let hit = candidates
            .iter()
            .filter(|droppable| droppable.rect.contains(pointer))
            .min_by(|a, b| compare(a.rect.area(), b.rect.area()));
        if let Some(hit) = hit {
            return hit.zone.clone();
        }
    }

    if let Some(dragged) = dragged {
        let best = candidates
            .iter()
            .map(|droppable| (droppable, droppable.rect.overlap_ratio(dragged)))
            .filter(|(_, ratio)| *ratio > 0.0)
            // Reversed so ties keep the first registered
            .min_by(|(_, a), (_, b)| compare(*b, *a));
        if let Some((droppable, _)) = best {
            return droppable.zone.clone();
        }
    }

    DropZone::NoTarget
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
