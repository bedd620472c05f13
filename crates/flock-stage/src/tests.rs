//! Unit tests for the stage passes.

#[cfg(test)]
mod boundary {
    use flock_core::{BoundaryVolume, WallRepulsion};
    use glam::Vec3;

    use crate::{apply_boundary, face_push, wall_accel};

    fn volume() -> BoundaryVolume {
        BoundaryVolume::new(Vec3::splat(10.0))
    }

    #[test]
    fn far_from_walls_is_zero() {
        let walls = WallRepulsion::default();
        assert_eq!(wall_accel(Vec3::ZERO, &volume(), &walls), Vec3::ZERO);
        assert_eq!(wall_accel(Vec3::new(6.9, -6.9, 0.0), &volume(), &walls), Vec3::ZERO);
    }

    #[test]
    fn push_curve_matches_weight_over_ratio() {
        let walls = WallRepulsion::default(); // threshold 3, weight 2
        assert_eq!(face_push(3.0, &walls), 0.0);
        assert_eq!(face_push(-3.5, &walls), 0.0);
        assert!((face_push(1.5, &walls) - 4.0).abs() < 1e-6);
        assert!((face_push(-1.0, &walls) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn near_positive_face_pushes_inward() {
        let walls = WallRepulsion::default();
        // 1 unit from the +x face: push = 2 / (1/3) = 6 toward -x.
        let a = wall_accel(Vec3::new(9.0, 0.0, 0.0), &volume(), &walls);
        assert!((a.x + 6.0).abs() < 1e-5, "{a}");
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn near_negative_face_pushes_inward() {
        let walls = WallRepulsion::default();
        let a = wall_accel(Vec3::new(0.0, 0.0, -8.5), &volume(), &walls);
        assert!((a.z - 4.0).abs() < 1e-5, "{a}");
    }

    #[test]
    fn corner_sums_faces() {
        let walls = WallRepulsion::default();
        let a = wall_accel(Vec3::new(9.0, -9.0, 9.0), &volume(), &walls);
        assert!((a - Vec3::new(-6.0, 6.0, -6.0)).length() < 1e-4, "{a}");
    }

    #[test]
    fn on_the_face_is_unbounded_without_floor() {
        let walls = WallRepulsion::default();
        let a = wall_accel(Vec3::new(10.0, 0.0, 0.0), &volume(), &walls);
        assert!(a.x.is_infinite() && a.x < 0.0);
        // The other axes stay clean.
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn floor_caps_the_push() {
        let walls = WallRepulsion { min_distance: Some(0.5), ..WallRepulsion::default() };
        let a = wall_accel(Vec3::new(10.0, 0.0, 0.0), &volume(), &walls);
        assert!((a.x + 12.0).abs() < 1e-5, "{a}");
    }

    #[test]
    fn pass_accumulates_into_existing_acceleration() {
        let walls = WallRepulsion::default();
        let position = [Vec3::new(9.0, 0.0, 0.0), Vec3::ZERO];
        let mut acceleration = [Vec3::ONE, Vec3::ONE];
        apply_boundary(&position, &mut acceleration, &volume(), &walls);
        assert!((acceleration[0] - Vec3::new(-5.0, 1.0, 1.0)).length() < 1e-5);
        assert_eq!(acceleration[1], Vec3::ONE);
    }
}

#[cfg(test)]
mod flock {
    use flock_core::FlockParams;
    use glam::Vec3;

    use crate::{apply_flock, flock_accel};

    fn separation_only() -> FlockParams {
        FlockParams { separation: 1.0, alignment: 0.0, cohesion: 0.0, neighbor_distance: 3.0 }
    }

    #[test]
    fn lone_agent_at_origin_gets_nothing() {
        let params = FlockParams::default();
        let a = flock_accel(0, &[Vec3::ZERO], &[Vec3::X], &params);
        assert_eq!(a, Vec3::ZERO);
    }

    #[test]
    fn separation_pushes_pair_apart() {
        let positions = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)];
        let velocities = [Vec3::ZERO; 2];
        let a0 = flock_accel(0, &positions, &velocities, &separation_only());
        let a1 = flock_accel(1, &positions, &velocities, &separation_only());
        // normalize(-2,0,0) / n=2
        assert!((a0 - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6, "{a0}");
        assert!((a1 - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6, "{a1}");
    }

    #[test]
    fn out_of_range_neighbours_ignored() {
        let positions = [Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)];
        let a = flock_accel(0, &positions, &[Vec3::ZERO; 2], &separation_only());
        assert_eq!(a, Vec3::ZERO);
    }

    #[test]
    fn averages_over_whole_population() {
        // Agent 2 is far away; it is not a neighbour but still divides the sums.
        let positions = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(50.0, 0.0, 0.0)];
        let velocities = [Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO];
        let params = FlockParams { separation: 0.0, alignment: 1.0, cohesion: 0.0, neighbor_distance: 3.0 };
        let a = flock_accel(0, &positions, &velocities, &params);
        assert!((a - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6, "{a}");
    }

    #[test]
    fn cohesion_is_offset_by_own_position() {
        let positions = [Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
        let params = FlockParams { separation: 0.0, alignment: 0.0, cohesion: 1.0, neighbor_distance: 3.0 };
        let a = flock_accel(0, &positions, &[Vec3::ZERO; 2], &params);
        // pos_avg = 3/2 = 1.5; 1.5 - 2 = -0.5
        assert!((a.x + 0.5).abs() < 1e-6, "{a}");
    }

    #[test]
    fn coincident_agents_have_no_separation() {
        let positions = [Vec3::ONE, Vec3::ONE];
        let a = flock_accel(0, &positions, &[Vec3::ZERO; 2], &separation_only());
        assert!(a.is_finite());
        assert_eq!(a, Vec3::ZERO);
    }

    #[test]
    fn pass_matches_kernel() {
        let positions = [Vec3::new(-1.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.2), Vec3::new(0.0, 1.0, -1.0)];
        let velocities = [Vec3::X, Vec3::Y, Vec3::Z];
        let params = FlockParams::default();
        let mut acceleration = [Vec3::ZERO; 3];
        apply_flock(&positions, &velocities, &mut acceleration, &params);
        for (i, acc) in acceleration.iter().enumerate() {
            assert_eq!(*acc, flock_accel(i, &positions, &velocities, &params));
        }
    }
}

#[cfg(test)]
mod integrate {
    use flock_agent::{AgentStore, AgentStoreBuilder};
    use flock_core::{BoundaryVolume, SpeedLimit, Transform, VisualId, WallRepulsion};
    use glam::Vec3;

    use crate::{apply_boundary, apply_integrate, integrate_agent};

    const DT: f32 = 0.1;

    #[test]
    fn speed_is_clamped_and_acceleration_cleared() {
        let (mut store, _) = AgentStoreBuilder::new(64, 5).build();
        {
            let lanes = store.lanes_mut();
            for (i, a) in lanes.acceleration.iter_mut().enumerate() {
                *a = Vec3::new(i as f32 * 10.0, -(i as f32), 0.5);
            }
        }
        let speed = SpeedLimit::new(1.0, 3.0);
        let report = apply_integrate(store.lanes_mut(), &speed, DT);

        assert_eq!(report.degenerate, 0);
        for id in store.agent_ids() {
            let a = store.get(id).unwrap();
            let s = a.velocity.length();
            assert!(s >= 1.0 - 1e-4 && s <= 3.0 + 1e-4, "agent {id}: speed {s}");
            assert_eq!(a.acceleration, Vec3::ZERO);
            assert_eq!(a.position, a.transform.position);
        }
    }

    #[test]
    fn moves_by_velocity_and_faces_it() {
        let mut p = Vec3::ZERO;
        let mut v = Vec3::new(2.0, 0.0, 0.0);
        let mut a = Vec3::ZERO;
        let mut t = Transform::at_origin(VisualId(0));
        let degenerate = integrate_agent(&mut p, &mut v, &mut a, &mut t, &SpeedLimit::new(1.0, 5.0), DT);

        assert!(!degenerate);
        assert!((p - Vec3::new(0.2, 0.0, 0.0)).length() < 1e-6);
        assert!((t.forward() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn zero_velocity_keeps_forward_at_min_speed() {
        let mut p = Vec3::ZERO;
        let mut v = Vec3::ZERO;
        let mut a = Vec3::ZERO;
        let mut t = Transform::at_origin(VisualId(0));
        let degenerate = integrate_agent(&mut p, &mut v, &mut a, &mut t, &SpeedLimit::new(1.5, 5.0), DT);

        assert!(degenerate);
        assert!((v - Vec3::Z * 1.5).length() < 1e-6, "{v}");
        assert!(p.length() <= 1.5 * DT + 1e-6);
    }

    #[test]
    fn cancelling_acceleration_holds_previous_heading() {
        let mut p = Vec3::ZERO;
        let mut v = Vec3::new(0.0, 1.0, 0.0);
        let mut a = Vec3::new(0.0, -10.0, 0.0); // v + a*dt == 0
        let mut t = Transform::at_origin(VisualId(0));
        let degenerate = integrate_agent(&mut p, &mut v, &mut a, &mut t, &SpeedLimit::new(1.0, 5.0), DT);

        assert!(degenerate);
        assert!((v - Vec3::Y).length() < 1e-6, "{v}");
    }

    #[test]
    fn infinite_push_falls_back_without_nan() {
        let mut p = Vec3::new(10.0, 0.0, 0.0);
        let mut v = Vec3::new(0.0, 0.0, 2.0);
        let mut a = Vec3::new(f32::NEG_INFINITY, 0.0, 0.0);
        let mut t = Transform { position: p, ..Transform::at_origin(VisualId(0)) };
        let degenerate = integrate_agent(&mut p, &mut v, &mut a, &mut t, &SpeedLimit::new(1.0, 5.0), DT);

        assert!(degenerate);
        assert!(v.is_finite() && p.is_finite());
        assert!((v + Vec3::X).length() < 1e-6, "{v}");
    }

    #[test]
    fn agent_on_wall_moves_back_inside() {
        let volume = BoundaryVolume::from_size(Vec3::splat(20.0));
        let mut p = Vec3::new(10.0, 0.5, 0.5);
        let mut v = Vec3::X;
        let mut a = Vec3::ZERO;
        apply_boundary(
            std::slice::from_ref(&p),
            std::slice::from_mut(&mut a),
            &volume,
            &WallRepulsion::default(),
        );
        let mut t = Transform { position: p, ..Transform::at_origin(VisualId(0)) };

        let degenerate = integrate_agent(&mut p, &mut v, &mut a, &mut t, &SpeedLimit::new(1.0, 5.0), DT);

        assert!(degenerate);
        assert!((v + Vec3::X).length() < 1e-6, "{v}");
        assert!(p.x < 10.0 && volume.contains(p), "{p}");
        assert!((t.forward() + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn empty_store_is_fine() {
        let mut store = AgentStore::new();
        let report = apply_integrate(store.lanes_mut(), &SpeedLimit::default(), DT);
        assert_eq!(report.degenerate, 0);
    }
}

#[cfg(test)]
mod octant {
    use glam::Vec3;

    use crate::{Octant, OctantCounts, count_octants};

    #[test]
    fn classify_matches_bucket_order() {
        let cases = [
            (Vec3::new(-1.0, -1.0, -1.0), Octant::LeftDownBack, 0),
            (Vec3::new(1.0, -1.0, -1.0), Octant::RightDownBack, 1),
            (Vec3::new(-1.0, 1.0, -1.0), Octant::LeftTopBack, 2),
            (Vec3::new(-1.0, -1.0, 1.0), Octant::LeftDownForward, 3),
            (Vec3::new(1.0, 1.0, -1.0), Octant::RightTopBack, 4),
            (Vec3::new(1.0, -1.0, 1.0), Octant::RightDownForward, 5),
            (Vec3::new(-1.0, 1.0, 1.0), Octant::LeftTopForward, 6),
            (Vec3::new(1.0, 1.0, 1.0), Octant::RightTopForward, 7),
        ];
        for (p, octant, index) in cases {
            assert_eq!(Octant::classify(p), Some(octant));
            assert_eq!(octant.index(), index);
            assert_eq!(Octant::ALL[index], octant);
        }
    }

    #[test]
    fn points_on_planes_are_excluded() {
        assert_eq!(Octant::classify(Vec3::ZERO), None);
        assert_eq!(Octant::classify(Vec3::new(1.0, 0.0, 1.0)), None);
        assert_eq!(Octant::classify(Vec3::new(-0.0, 1.0, 1.0)), None);
        assert_eq!(Octant::classify(Vec3::new(f32::NAN, 1.0, 1.0)), None);
    }

    #[test]
    fn counts_partition_population_off_planes() {
        let positions: Vec<Vec3> = (0..200)
            .map(|i| {
                let f = i as f32 + 0.5;
                Vec3::new(f.sin(), (f * 1.7).cos(), (f * 0.3).sin() + 0.01 * f.signum())
            })
            .filter(|p| p.x != 0.0 && p.y != 0.0 && p.z != 0.0)
            .collect();
        let counts = count_octants(&positions);
        assert_eq!(counts.total(), positions.len() as u64);
    }

    #[test]
    fn plane_agents_undercount() {
        let positions = [Vec3::ONE, Vec3::ZERO, Vec3::new(-1.0, 0.0, 2.0)];
        let counts = count_octants(&positions);
        assert_eq!(counts.total(), 1);
        assert_eq!(counts[Octant::RightTopForward], 1);
    }

    #[test]
    fn merge_and_display() {
        let a = OctantCounts::from_array([1, 0, 0, 0, 0, 0, 0, 2]);
        let b = OctantCounts::from_array([0, 1, 0, 0, 0, 0, 0, 1]);
        let m = a.merge(b);
        assert_eq!(m.as_array(), &[1, 1, 0, 0, 0, 0, 0, 3]);
        assert_eq!(m.get(Octant::RightTopForward), 3);
        let text = m.to_string();
        assert!(text.starts_with("block-left-down-back: 1\n"));
        assert!(text.ends_with("block-right-top-forward: 3"));
        assert_eq!(text.lines().count(), 8);
    }
}
