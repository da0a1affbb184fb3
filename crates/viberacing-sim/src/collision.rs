//! Car/car contact resolution
//!
//! Cars are treated as discs of diameter `min_separation`. Overlapping cars
//! are pushed apart symmetrically along the center line and bounce with
//! damped, reversed speed. This is an inelastic approximation, not a rigid
//! body response.

use viberacing_common::PhysicsConfig;

use crate::track::PlayArea;
use crate::vehicle::Vehicle;

/// A resolved overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Indices into the car list, `a < b`
    pub a: usize,
    pub b: usize,
    /// Penetration depth before resolution
    pub overlap: f64,
    /// Unit vector from `a` toward `b`
    pub normal: (f64, f64),
}

/// Separate two cars if they overlap. Coincident centers have no normal and
/// are left alone.
pub fn resolve_pair(
    a: &mut Vehicle,
    b: &mut Vehicle,
    physics: &PhysicsConfig,
    area: &PlayArea,
) -> Option<(f64, (f64, f64))> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist = dx.hypot(dy);
    let min_dist = physics.min_separation();

    if dist == 0.0 || dist >= min_dist {
        return None;
    }

    let overlap = min_dist - dist;
    let nx = dx / dist;
    let ny = dy / dist;
    let push = overlap * 0.5;

    a.x -= nx * push;
    a.y -= ny * push;
    b.x += nx * push;
    b.y += ny * push;

    a.speed *= -physics.collision_damping;
    b.speed *= -physics.collision_damping;

    a.clamp_to(area);
    b.clamp_to(area);

    Some((overlap, (nx, ny)))
}

/// All pairs, in index order. With more than two cars the result depends on
/// that order.
pub fn resolve_all(cars: &mut [Vehicle], physics: &PhysicsConfig, area: &PlayArea) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for i in 0..cars.len() {
        for j in (i + 1)..cars.len() {
            let (head, tail) = cars.split_at_mut(j);
            if let Some((overlap, normal)) = resolve_pair(&mut head[i], &mut tail[0], physics, area) {
                contacts.push(Contact { a: i, b: j, overlap, normal });
            }
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PlayerSlot;

    fn area() -> PlayArea {
        PlayArea { min_x: 14.0, min_y: 14.0, max_x: 886.0, max_y: 586.0 }
    }

    fn pair_at(a: (f64, f64), b: (f64, f64)) -> (Vehicle, Vehicle) {
        let mut va = Vehicle::on_grid(PlayerSlot::Blue, (0.0, 0.0), 0.0);
        let mut vb = Vehicle::on_grid(PlayerSlot::Yellow, (0.0, 0.0), 0.0);
        va.x = a.0;
        va.y = a.1;
        vb.x = b.0;
        vb.y = b.1;
        (va, vb)
    }

    #[test]
    fn overlap_resolves_to_exact_separation_on_any_axis() {
        let physics = PhysicsConfig::default();
        for step in 0..16 {
            let angle = step as f64 * std::f64::consts::TAU / 16.0 + 0.1;
            let a0 = (400.0, 300.0);
            let b0 = (400.0 + 10.0 * angle.cos(), 300.0 + 10.0 * angle.sin());
            let (mut a, mut b) = pair_at(a0, b0);

            let (overlap, _) = resolve_pair(&mut a, &mut b, &physics, &area()).expect("overlapping");
            assert!((overlap - 11.0).abs() < 1e-9);

            let dist = (b.x - a.x).hypot(b.y - a.y);
            assert!((dist - physics.min_separation()).abs() < 1e-9,
                "angle {:.2}: separation {}", angle, dist);

            let da = (a.x - a0.0, a.y - a0.1);
            let db = (b.x - b0.0, b.y - b0.1);
            assert!((da.0 + db.0).abs() < 1e-9 && (da.1 + db.1).abs() < 1e-9,
                "displacements not opposite: {:?} vs {:?}", da, db);
            assert!((da.0.hypot(da.1) - 5.5).abs() < 1e-9);
        }
    }

    #[test]
    fn contact_reverses_and_damps_speed() {
        let physics = PhysicsConfig::default();
        let (mut a, mut b) = pair_at((400.0, 300.0), (410.0, 300.0));
        a.speed = 100.0;
        b.speed = -40.0;
        resolve_pair(&mut a, &mut b, &physics, &area());
        assert!((a.speed + 85.0).abs() < 1e-9);
        assert!((b.speed - 34.0).abs() < 1e-9);
    }

    #[test]
    fn separated_cars_untouched() {
        let physics = PhysicsConfig::default();
        let (mut a, mut b) = pair_at((400.0, 300.0), (430.0, 300.0));
        a.speed = 50.0;
        assert!(resolve_pair(&mut a, &mut b, &physics, &area()).is_none());
        assert_eq!(a.position(), (400.0, 300.0));
        assert_eq!(a.speed, 50.0);
    }

    #[test]
    fn coincident_cars_are_a_no_op() {
        let physics = PhysicsConfig::default();
        let (mut a, mut b) = pair_at((400.0, 300.0), (400.0, 300.0));
        a.speed = 50.0;
        assert!(resolve_pair(&mut a, &mut b, &physics, &area()).is_none());
        assert_eq!(a.position(), b.position());
        assert_eq!(a.speed, 50.0);
    }

    #[test]
    fn push_out_respects_play_area() {
        let physics = PhysicsConfig::default();
        let (mut a, mut b) = pair_at((15.0, 300.0), (25.0, 300.0));
        resolve_pair(&mut a, &mut b, &physics, &area());
        assert_eq!(a.x, 14.0);
        assert!(b.x > 25.0);
    }

    #[test]
    fn resolve_all_reports_indices() {
        let physics = PhysicsConfig::default();
        let (a, b) = pair_at((400.0, 300.0), (405.0, 300.0));
        let mut cars = vec![a, b];
        let contacts = resolve_all(&mut cars, &physics, &area());
        assert_eq!(contacts.len(), 1);
        assert_eq!((contacts[0].a, contacts[0].b), (0, 1));
        assert!((contacts[0].normal.0 - 1.0).abs() < 1e-12);
        assert!(resolve_all(&mut cars, &physics, &area()).is_empty());
    }
}
