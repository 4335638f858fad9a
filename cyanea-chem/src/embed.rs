//! Heuristic 3D coordinates for molecules built from SMILES.
//!
//! This is a fast placement heuristic, not a conformer generator. Atoms are
//! placed breadth-first at ideal bond lengths from their parent, with no
//! force field, no torsion preferences and no ring closure geometry. Ring
//! closures and crowded polycyclic systems can end up with long bonds or
//! overlapping atoms; the output is a starting point for a real optimizer.
//!
//! Placement of a new atom around its already-placed parent:
//!
//! 1. parent has no other placed neighbor: a random direction;
//! 2. parent has one: at the tetrahedral angle to that bond;
//! 3. otherwise: the direction on a coarse grid that keeps the new atom
//!    farthest from the parent's placed neighbors.
//!
//! Each connected component starts [`COMPONENT_GAP`] beyond the largest x
//! placed so far. The only randomness comes from the injected `rng`.

use std::collections::VecDeque;
use std::f64::consts::PI;

use rand::Rng;

use crate::element::bond_length;
use crate::molecule::{BondOrder, Molecule};

/// Bond angle used for the second neighbor of an atom, in degrees.
pub const TETRAHEDRAL_ANGLE_DEG: f64 = 109.5;

/// Distance along x between the end of one component and the next root.
pub const COMPONENT_GAP: f64 = 5.0;

const AZIMUTH_STEPS: usize = 12;
const POLAR_STEPS: usize = 6;

type Vec3 = [f64; 3];

// ---------------------------------------------------------------------------
// Vector helpers
// ---------------------------------------------------------------------------

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn add_scaled(a: Vec3, b: Vec3, s: f64) -> Vec3 {
    [a[0] + b[0] * s, a[1] + b[1] * s, a[2] + b[2] * s]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

fn normalize(a: Vec3) -> Option<Vec3> {
    let n = norm(a);
    (n > 1e-9).then(|| [a[0] / n, a[1] / n, a[2] / n])
}

// ---------------------------------------------------------------------------
// Embedding
// ---------------------------------------------------------------------------

/// Overwrite every atom's coordinates with a heuristic 3D layout.
pub fn embed_3d<R: Rng + ?Sized>(mol: &mut Molecule, rng: &mut R) {
    let mut placed = vec![false; mol.atom_count()];

    for (ci, component) in mol.components().into_iter().enumerate() {
        let root = component[0];
        mol.atoms[root].coords = if ci == 0 {
            [0.0; 3]
        } else {
            let max_x = mol
                .atoms
                .iter()
                .zip(&placed)
                .filter(|(_, &p)| p)
                .map(|(a, _)| a.coords[0])
                .fold(f64::NEG_INFINITY, f64::max);
            [max_x + COMPONENT_GAP, 0.0, 0.0]
        };
        placed[root] = true;

        if component.len() == 2 {
            let other = component[1];
            let order = mol.bond_between(root, other).map_or(BondOrder::Single, |b| b.order);
            let length = ideal_length(mol, root, other, order);
            mol.atoms[other].coords = add_scaled(mol.atoms[root].coords, [1.0, 0.0, 0.0], length);
            placed[other] = true;
            continue;
        }

        let mut queue = VecDeque::from([root]);
        while let Some(parent) = queue.pop_front() {
            let children: Vec<(usize, BondOrder)> = mol
                .bonds_of(parent)
                .map(|(n, b)| (n, b.order))
                .collect();
            for (child, order) in children {
                if placed[child] {
                    continue;
                }
                let position = place(mol, parent, child, order, &placed, rng);
                mol.atoms[child].coords = position;
                placed[child] = true;
                queue.push_back(child);
            }
        }
    }
    log::debug!("embedded {} atom(s) in 3D", mol.atom_count());
}

fn ideal_length(mol: &Molecule, a: usize, b: usize, order: BondOrder) -> f64 {
    bond_length(&mol.atoms[a].symbol, &mol.atoms[b].symbol, order.mdl_code())
}

fn place<R: Rng + ?Sized>(
    mol: &Molecule,
    parent: usize,
    child: usize,
    order: BondOrder,
    placed: &[bool],
    rng: &mut R,
) -> Vec3 {
    let origin = mol.atoms[parent].coords;
    let length = ideal_length(mol, parent, child, order);
    let others: Vec<Vec3> = mol
        .neighbors(parent)
        .filter(|&n| n != child && placed[n])
        .map(|n| mol.atoms[n].coords)
        .collect();

    let direction = match others.as_slice() {
        [] => None,
        [single] => normalize(sub(*single, origin)).and_then(tetrahedral_direction),
        many => Some(farthest_grid_direction(origin, length, many)),
    };
    let direction = direction.unwrap_or_else(|| random_direction(rng));
    add_scaled(origin, direction, length)
}

/// Uniform random unit vector.
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z = 2.0 * rng.random::<f64>() - 1.0;
    let phi = 2.0 * PI * rng.random::<f64>();
    let r = (1.0 - z * z).max(0.0).sqrt();
    [r * phi.cos(), r * phi.sin(), z]
}

/// Unit vector at the tetrahedral angle to `bond`, in the plane of `bond`
/// and a perpendicular built by crossing with a coordinate axis.
fn tetrahedral_direction(bond: Vec3) -> Option<Vec3> {
    let axis = if bond[0].abs() > 0.9 {
        [0.0, 1.0, 0.0]
    } else {
        [1.0, 0.0, 0.0]
    };
    let perp = normalize(cross(bond, axis))?;
    let theta = TETRAHEDRAL_ANGLE_DEG.to_radians();
    let along = [bond[0] * theta.cos(), bond[1] * theta.cos(), bond[2] * theta.cos()];
    Some(add_scaled(along, perp, theta.sin()))
}

/// Grid direction maximizing the minimum distance from the new position to
/// `neighbors`. Ties keep the first grid point.
fn farthest_grid_direction(origin: Vec3, length: f64, neighbors: &[Vec3]) -> Vec3 {
    let mut best = [1.0, 0.0, 0.0];
    let mut best_score = f64::NEG_INFINITY;
    for direction in grid_directions() {
        let candidate = add_scaled(origin, direction, length);
        let score = neighbors
            .iter()
            .map(|&n| norm(sub(candidate, n)))
            .fold(f64::INFINITY, f64::min);
        if score > best_score {
            best_score = score;
            best = direction;
        }
    }
    best
}

/// Both poles plus rings of [`AZIMUTH_STEPS`] directions at evenly spaced
/// polar angles.
fn grid_directions() -> impl Iterator<Item = Vec3> {
    let poles = [[0.0, 0.0, 1.0], [0.0, 0.0, -1.0]];
    let rings = (1..POLAR_STEPS).flat_map(|i| {
        let theta = PI * i as f64 / POLAR_STEPS as f64;
        (0..AZIMUTH_STEPS).map(move |j| {
            let phi = 2.0 * PI * j as f64 / AZIMUTH_STEPS as f64;
            [theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()]
        })
    });
    poles.into_iter().chain(rings)
}
