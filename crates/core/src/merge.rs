//! Static merge - composite unmoving sprites at level construction
//!
//! Sprites tagged `static` that share a layer, blocking mode and interaction
//! mode are painted into one composite sprite, so the camera and collision
//! checks walk fewer sprites every frame. Compositing follows painter's
//! order: later sprites overwrite earlier ones where both are opaque.
//!
//! Only NOT_BLOCKED and PIXEL_PERFECT sprites merge. A BOUNDING_BOX
//! composite would block the empty space between its members.
//!
//! Merging never changes what the camera draws. A group is split into runs
//! wherever another sprite on the same layer sits between two members, and
//! a run is also split when its composite would be mostly empty space.

use std::collections::HashMap;

use log::debug;

use crate::pixels::PixelGrid;
use crate::sprite::{Bounds, Sprite};
use crate::types::{BlockingMode, InteractionMode, STATIC_TAG, TRANSPARENT};

type GroupKey = (i32, BlockingMode, InteractionMode);

/// A composite may cover at most this many times its members' own area
const MAX_SPARSITY: i64 = 4;

fn merge_key(sprite: &Sprite) -> Option<GroupKey> {
    if !sprite.has_tag(STATIC_TAG)
        || sprite.blocking() == BlockingMode::BoundingBox
        || sprite.interaction() == InteractionMode::Removed
    {
        return None;
    }
    Some((sprite.layer(), sprite.blocking(), sprite.interaction()))
}

fn area(bounds: &Bounds) -> i64 {
    bounds.width as i64 * bounds.height as i64
}

/// Consecutive members of one group that can share a composite
struct Run {
    members: Vec<usize>,
    bounds: Bounds,
    covered: i64,
}

impl Run {
    fn new(index: usize, bounds: Bounds) -> Self {
        Self {
            members: vec![index],
            bounds,
            covered: area(&bounds),
        }
    }

    fn fits(&self, bounds: &Bounds) -> bool {
        let merged = self.bounds.union(bounds);
        area(&merged) <= MAX_SPARSITY * (self.covered + area(bounds))
    }

    fn push(&mut self, index: usize, bounds: Bounds) {
        self.members.push(index);
        self.bounds = self.bounds.union(&bounds);
        self.covered += area(&bounds);
    }
}

/// Indices of the sprites to merge, one list per composite
fn plan_runs(sprites: &[Sprite]) -> Vec<Vec<usize>> {
    let mut open: HashMap<GroupKey, Run> = HashMap::new();
    let mut closed: Vec<Vec<usize>> = Vec::new();

    for (i, sprite) in sprites.iter().enumerate() {
        let key = merge_key(sprite);
        let layer = sprite.layer();

        // Anything else on this layer is painted between earlier and later members
        let interrupted: Vec<GroupKey> = open
            .keys()
            .filter(|k| k.0 == layer && Some(**k) != key)
            .copied()
            .collect();
        for k in interrupted {
            if let Some(run) = open.remove(&k) {
                closed.push(run.members);
            }
        }

        let Some(key) = key else {
            continue;
        };
        let bounds = sprite.bounds();
        let fits = open.get(&key).map_or(false, |run| run.fits(&bounds));
        if fits {
            if let Some(run) = open.get_mut(&key) {
                run.push(i, bounds);
            }
        } else if let Some(run) = open.insert(key, Run::new(i, bounds)) {
            closed.push(run.members);
        }
    }

    closed.extend(open.into_values().map(|run| run.members));
    closed.retain(|members| members.len() > 1);
    closed
}

/// Paint `members` into one sprite covering their combined bounds
fn composite(members: &[Sprite]) -> Sprite {
    let first = &members[0];
    let area = members
        .iter()
        .skip(1)
        .fold(first.bounds(), |acc, s| acc.union(&s.bounds()));

    let mut grid = PixelGrid::transparent(area.width as usize, area.height as usize);
    for member in members {
        paint(&mut grid, &area, member);
    }

    let mut merged = Sprite::from_grid(grid)
        .with_position(area.x, area.y)
        .with_layer(first.layer())
        .with_blocking(first.blocking())
        .with_interaction(first.interaction())
        .with_tag(STATIC_TAG);
    for member in members {
        for tag in member.tags() {
            merged.add_tag(tag);
        }
    }
    merged
}

fn paint(grid: &mut PixelGrid, area: &Bounds, sprite: &Sprite) {
    let ox = (sprite.x() as i64 - area.x as i64) as usize;
    let oy = (sprite.y() as i64 - area.y as i64) as usize;
    for (y, row) in sprite.render().rows().enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            if pixel != TRANSPARENT {
                grid.set(ox + x, oy + y, pixel);
            }
        }
    }
}

/// Merge static sprites, preserving the order of everything else
///
/// Each composite takes the slot of the first sprite of its run. Runs with
/// a single member are left untouched.
pub fn merge_static(sprites: Vec<Sprite>) -> Vec<Sprite> {
    let runs = plan_runs(&sprites);
    if runs.is_empty() {
        return sprites;
    }

    // slot index -> members merged into that slot
    let mut heads: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut absorbed = vec![false; sprites.len()];
    for members in runs {
        for &i in &members[1..] {
            absorbed[i] = true;
        }
        heads.insert(members[0], members);
    }

    let mut slots: Vec<Option<Sprite>> = sprites.into_iter().map(Some).collect();
    let mut out = Vec::with_capacity(slots.len());
    for i in 0..slots.len() {
        if absorbed[i] {
            continue;
        }
        match heads.get(&i) {
            Some(members) => {
                let group: Vec<Sprite> = members.iter().filter_map(|&m| slots[m].take()).collect();
                debug!(
                    "merged {} static sprites on layer {} into {}",
                    group.len(),
                    group[0].layer(),
                    group[0].name()
                );
                out.push(composite(&group));
            }
            None => {
                if let Some(sprite) = slots[i].take() {
                    out.push(sprite);
                }
            }
        }
    }
    out
}
