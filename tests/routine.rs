mod common;

mod tests {
    use std::collections::BTreeSet;

    use badge_routines::{
        Duration, Error, FloatRgb, Outcome, Pack, PixelBuffer, Routine, RoutineContext, RunConfig,
        StopSignal,
        color::{BLACK, BLUE, GREEN, RED, Rgb, hsv_to_rgb, vivid, wheel},
        routine::{
            ChaseBlink, GroupBlink, HueSweep, PaletteSpin, PixelGroup, RandomPixels,
            StripRainbow, blink, cycle_position, mirrored_groups,
        },
    };
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use crate::common::{MAX_LEDS, MockClock, MockDriver, MockError, SimTime, plain_strip};

    /// Long enough for exactly one iteration of any routine
    fn single_iteration() -> RunConfig {
        RunConfig {
            duration: Duration::from_millis(1),
            use_timer: true,
        }
    }

    #[test]
    fn test_mirrored_groups_on_badge() {
        let groups: Vec<_> = mirrored_groups(5).collect();
        assert_eq!(
            groups,
            vec![
                PixelGroup::pair(0, 4),
                PixelGroup::pair(1, 3),
                PixelGroup::single(2)
            ]
        );
        assert_eq!(groups[2].indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_mirrored_groups_partition_strip() {
        for len in 0..20 {
            let mut seen = BTreeSet::new();
            for group in mirrored_groups(len) {
                for index in group.indices() {
                    assert!(index < len);
                    assert!(seen.insert(index), "index {index} repeated for len {len}");
                }
            }
            assert_eq!(seen.len(), len);
        }
    }

    #[test]
    fn test_pixel_group_contains() {
        let group = PixelGroup::pair(1, 3);
        assert!(group.contains(1) && group.contains(3));
        assert!(!group.contains(2));
    }

    #[test]
    fn test_blink_restores_frame() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();
        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            let mut frame =
                PixelBuffer::<_, MAX_LEDS>::new(&mut driver, plain_strip(5)).unwrap();
            frame.fill(BLUE);
            frame.set(2, RED).unwrap();
            let before = frame.snapshot();

            blink(&mut frame, &mut ctx, Duration::from_millis(10), 3).unwrap();

            assert_eq!(frame.pixels(), before.as_slice());
        }

        // Off, on, off, on, off, on, then the blank on release
        assert_eq!(driver.frames.len(), 7);
        for cycle in 0..3 {
            assert_eq!(driver.frames[cycle * 2], vec![BLACK; 5]);
            assert_eq!(driver.frames[cycle * 2 + 1], vec![BLUE, BLUE, RED, BLUE, BLUE]);
        }
        assert_eq!(clock.sleeps, vec![Duration::from_millis(10); 3]);
        assert_eq!(time.millis(), 30);
    }

    #[test]
    fn test_hue_sweep_completes_after_deadline() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();
        let routine = HueSweep::new(5).with_strip(plain_strip(5));

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            routine.run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        assert_eq!(outcome, Ok(Outcome::Completed));
        // Two sweeps of 256 frames at 10 ms pass the 5 s deadline
        assert_eq!(time.millis(), 5_120);
        assert_eq!(driver.frames.len(), 2 * 256 + 1);
        assert_eq!(driver.frames[0], vec![RED; 5]);
        assert_eq!(driver.frames[128], vec![hsv_to_rgb(vivid(128)); 5]);
        assert_eq!(driver.last_frame(), Some(&[BLACK; 5][..]));
    }

    #[test]
    fn test_hue_sweep_without_timer_runs_until_stopped() {
        let stop = StopSignal::new();
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone()).stopping_at(60_000, &stop);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut driver = MockDriver::new();

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::unlimited());
            HueSweep::new(5).run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        assert_eq!(outcome, Ok(Outcome::Cancelled));
        assert!(time.millis() >= 60_000);
        assert!(time.millis() < 60_000 + 10);
    }

    #[test]
    fn test_palette_spin_frames() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new().with_latency(time.clone(), 1);
        let routine = PaletteSpin::new(5).with_strip(plain_strip(5));

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            routine.run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        assert_eq!(outcome, Ok(Outcome::Completed));
        assert!(clock.sleeps.is_empty());
        // Paced only by the 1 ms commit: 5001 frames plus the release blank
        assert_eq!(driver.frames.len(), 5_002);

        // Gamma 2.5 at brightness 0.25 leaves pure red at 64
        assert_eq!(driver.frames[0][0], Rgb { r: 64, g: 0, b: 0 });
        for (frame_index, frame) in driver.frames.iter().take(3).enumerate() {
            let offset = frame_index as f32 * 0.01;
            for (index, color) in frame.iter().enumerate() {
                assert_eq!(*color, routine.color_at(offset, index, 5).pack());
            }
        }
        assert_ne!(driver.frames[0], driver.frames[50]);
    }

    #[test]
    fn test_palette_spin_keeps_moving_from_large_offset() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time);
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();
        let routine = PaletteSpin::new(5).with_strip(plain_strip(5));

        let mut offset: f32 = 262_144.0;
        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            let mut frame =
                PixelBuffer::<_, MAX_LEDS>::new(&mut driver, routine.strip()).unwrap();
            for _ in 0..100 {
                routine.iteration(&mut offset, &mut frame, &mut ctx).unwrap();
                assert!((0.0..1.0).contains(&offset), "offset {offset} left one turn");
            }
        }

        // Wrapped to 0.0 after the first frame, then 99 steps of 0.01
        assert!((offset - 0.99).abs() < 1e-3, "offset {offset}");
        assert_eq!(driver.frames.len(), 101);
        assert_ne!(driver.frames[1], driver.frames[2]);
        assert_ne!(driver.frames[1], driver.frames[50]);
        assert_ne!(driver.frames[0], driver.frames[99]);
    }

    /// Run `routine` for one outer iteration on a plain strip
    fn run_once<T: Routine>(
        routine: &T,
        latency_ms: u64,
    ) -> (Vec<Vec<Rgb>>, Vec<Duration>, u64) {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(4);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new().with_latency(time.clone(), latency_ms);
        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, single_iteration());
            let outcome = routine.run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx);
            assert_eq!(outcome, Ok(Outcome::Completed));
        }
        (driver.frames, clock.sleeps, time.millis())
    }

    #[test]
    fn test_tuned_hue_sweep_and_random_pixels() {
        let hue = HueSweep::new(3)
            .with_strip(plain_strip(3))
            .with_frame_interval(Duration::from_millis(1));
        let (frames, sleeps, millis) = run_once(&hue, 0);
        assert_eq!(frames.len(), 257);
        assert_eq!(sleeps, vec![Duration::from_millis(1); 256]);
        assert_eq!(millis, 256);

        let random = RandomPixels::new(3)
            .with_strip(plain_strip(3))
            .with_pixel_interval(Duration::from_millis(2));
        let (frames, sleeps, millis) = run_once(&random, 0);
        assert_eq!(frames.len(), 2);
        assert_eq!(sleeps, vec![Duration::from_millis(2); 3]);
        assert_eq!(millis, 6);
    }

    #[test]
    fn test_tuned_blink_routines() {
        let ms = Duration::from_millis;

        let group = GroupBlink::new(3)
            .with_strip(plain_strip(3))
            .with_timing(ms(5), ms(1))
            .with_blink_cycles(2);
        let (frames, sleeps, millis) = run_once(&group, 0);
        // Groups {0, 2} then {1}: set, two off/on cycles, pause
        assert_eq!(frames.len(), 2 * 5 + 1);
        assert_eq!(sleeps, vec![ms(1), ms(1), ms(5), ms(1), ms(1), ms(5)]);
        assert_eq!(millis, 14);

        let chase = ChaseBlink::new(2)
            .with_strip(plain_strip(2))
            .with_timing(ms(3), ms(1))
            .with_blink_cycles(1);
        let (frames, sleeps, millis) = run_once(&chase, 0);
        assert_eq!(frames.len(), 2 * 3 + 1);
        assert_eq!(sleeps, vec![ms(1), ms(3), ms(1), ms(3)]);
        assert_eq!(millis, 8);
    }

    #[test]
    fn test_tuned_strip_rainbow_timing() {
        let rainbow = StripRainbow::new(4)
            .with_strip(plain_strip(4))
            .with_timing(Duration::from_millis(10), Duration::from_millis(2));
        let (frames, sleeps, millis) = run_once(&rainbow, 0);
        assert_eq!(frames.len(), 3 + 255 + 1);
        assert_eq!(sleeps.len(), 3 + 255);
        assert_eq!(millis, 30 + 255 * 2);
    }

    #[test]
    fn test_palette_spin_with_custom_palette() {
        static RED_BLUE: [FloatRgb; 2] = [
            FloatRgb::new(1.0, 0.0, 0.0),
            FloatRgb::new(0.0, 0.0, 1.0),
        ];
        let spin = PaletteSpin::new(2)
            .with_strip(plain_strip(2))
            .with_palette(&RED_BLUE)
            .with_step(0.5)
            .with_brightness(1.0);

        // 1 ms per commit: two frames pass the 1 ms deadline
        let (frames, sleeps, _) = run_once(&spin, 1);
        assert!(sleeps.is_empty());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], vec![RED, BLUE]);
        assert_eq!(frames[1], vec![BLUE, RED]);
    }

    #[test]
    fn test_random_pixels_is_reproducible() {
        fn record(seed: u64) -> (Vec<Vec<Rgb>>, Vec<Duration>) {
            let time = SimTime::default();
            let mut clock = MockClock::new(time);
            let mut rng = SmallRng::seed_from_u64(seed);
            let stop = StopSignal::new();
            let mut driver = MockDriver::new();
            {
                let mut ctx =
                    RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
                let outcome = RandomPixels::new(5)
                    .with_strip(plain_strip(5))
                    .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx);
                assert_eq!(outcome, Ok(Outcome::Completed));
            }
            (driver.frames, clock.sleeps)
        }

        let (first, sleeps) = record(42);
        let (second, _) = record(42);
        assert_eq!(first, second);

        let mut reference = SmallRng::seed_from_u64(42);
        let expected: Vec<Rgb> = (0..5)
            .map(|_| hsv_to_rgb(vivid(reference.random::<u8>())))
            .collect();
        assert_eq!(first[0], expected);

        // One staggered 10 ms sleep per pixel
        assert!(sleeps.iter().all(|sleep| *sleep == Duration::from_millis(10)));
        assert_eq!(sleeps.len() % 5, 0);
    }

    #[test]
    fn test_random_pixels_seed_changes_colors() {
        let mut frames = Vec::new();
        for seed in [1, 2] {
            let mut clock = MockClock::new(SimTime::default());
            let mut rng = SmallRng::seed_from_u64(seed);
            let stop = StopSignal::new();
            let mut driver = MockDriver::new();
            {
                let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, single_iteration());
                RandomPixels::new(5)
                    .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
                    .unwrap();
            }
            frames.push(driver.frames[0].clone());
        }
        assert_ne!(frames[0], frames[1]);
    }

    #[test]
    fn test_group_blink_walks_mirrored_groups() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(7);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, single_iteration());
            GroupBlink::new(5)
                .with_strip(plain_strip(5))
                .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };
        assert_eq!(outcome, Ok(Outcome::Completed));

        // Per group: one switch frame plus 50 off/on pairs
        let per_group = 1 + 2 * 50;
        assert_eq!(driver.frames.len(), 3 * per_group + 1);
        assert_eq!(driver.lit(0), vec![0, 4]);
        assert_eq!(driver.lit(per_group), vec![1, 3]);
        assert_eq!(driver.lit(2 * per_group), vec![2]);
        assert!(driver.lit(1).is_empty());
        assert_eq!(driver.frames[2], driver.frames[0]);

        let color = driver.frames[0][0];
        assert_ne!(color, BLACK);
        assert_eq!(driver.frames[per_group][1], color);
        assert_eq!(driver.frames[2 * per_group][2], color);

        // 3 groups x (50 x 10 ms blink + 500 ms pause)
        assert_eq!(time.millis(), 3_000);
    }

    #[test]
    fn test_chase_blink_sweeps_one_pixel_at_a_time() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(3);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();

        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, single_iteration());
            ChaseBlink::new(5)
                .with_strip(plain_strip(5))
                .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
                .unwrap();
        }

        let per_pixel = 1 + 2 * 20;
        assert_eq!(driver.frames.len(), 5 * per_pixel + 1);
        let color = driver.frames[0][0];
        for index in 0..5 {
            assert_eq!(driver.lit(index * per_pixel), vec![index]);
            assert_eq!(driver.frames[index * per_pixel][index], color);
        }
        // 5 pixels x (20 x 5 ms blink + 50 ms pause)
        assert_eq!(time.millis(), 750);
    }

    #[test]
    fn test_chase_blink_keeps_color_across_sweeps() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(11);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();
        let run = RunConfig {
            duration: Duration::from_millis(1_000),
            use_timer: true,
        };

        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, run);
            ChaseBlink::new(5)
                .with_strip(plain_strip(5))
                .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
                .unwrap();
        }

        // Two sweeps of 750 ms each
        let per_sweep = 5 * 41;
        assert_eq!(driver.frames.len(), 2 * per_sweep + 1);
        assert_eq!(driver.frames[0][0], driver.frames[per_sweep][0]);
    }

    #[test]
    fn test_strip_rainbow_sequence() {
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();

        {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, single_iteration());
            StripRainbow::new(30)
                .with_strip(plain_strip(30))
                .run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
                .unwrap();
        }

        assert_eq!(driver.frames.len(), 3 + 255 + 1);
        assert_eq!(driver.frames[0], vec![RED; 30]);
        assert_eq!(driver.frames[1], vec![GREEN; 30]);
        assert_eq!(driver.frames[2], vec![BLUE; 30]);
        for phase in [0u8, 100, 254] {
            let frame = &driver.frames[3 + usize::from(phase)];
            for (index, color) in frame.iter().enumerate() {
                assert_eq!(*color, wheel(cycle_position(index, 30, phase)));
            }
        }
        assert_eq!(time.millis(), 3_000 + 255);
    }

    #[test]
    fn test_strip_rainbow_defaults() {
        let strip = StripRainbow::new(30).strip();
        assert_eq!(strip.pixel_count, 30);
        assert_eq!(strip.order, badge_routines::ColorOrder::Grb);
        assert_eq!(strip.brightness, 51);
    }

    #[test]
    fn test_cycle_position() {
        assert_eq!(cycle_position(0, 30, 0), 0);
        assert_eq!(cycle_position(15, 30, 0), 128);
        assert_eq!(cycle_position(29, 30, 255), 246);
        assert_eq!(cycle_position(3, 0, 9), 9);
    }

    #[test]
    fn test_routine_rejects_oversized_strip() {
        let mut clock = MockClock::new(SimTime::default());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new();
        let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());

        let outcome = StripRainbow::new(30).run::<_, _, _, 8>(&mut driver, &mut ctx);

        assert_eq!(
            outcome,
            Err(Error::CapacityExceeded {
                requested: 30,
                capacity: 8
            })
        );
    }

    #[test]
    fn test_driver_failure_ends_routine() {
        let mut clock = MockClock::new(SimTime::default());
        let mut rng = SmallRng::seed_from_u64(1);
        let stop = StopSignal::new();
        let mut driver = MockDriver::new().failing_after(3);

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            HueSweep::new(5).run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        assert_eq!(outcome, Err(Error::Driver(MockError)));
        assert_eq!(driver.frames.len(), 3);
    }

    #[test]
    fn test_stop_interrupts_mid_iteration() {
        let stop = StopSignal::new();
        let time = SimTime::default();
        let mut clock = MockClock::new(time.clone()).stopping_at(1_000, &stop);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut driver = MockDriver::new();

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::unlimited());
            GroupBlink::new(5).run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        // One iteration takes 3 s; the stop lands at the first sleep boundary past 1 s
        assert_eq!(outcome, Ok(Outcome::Cancelled));
        assert!(time.millis() >= 1_000 && time.millis() <= 1_500);
        assert_eq!(driver.last_frame(), Some(&[BLACK; 5][..]));
    }

    #[test]
    fn test_raised_stop_prevents_any_frame() {
        let stop = StopSignal::new();
        stop.raise();
        let mut clock = MockClock::new(SimTime::default());
        let mut rng = SmallRng::seed_from_u64(5);
        let mut driver = MockDriver::new();

        let outcome = {
            let mut ctx = RoutineContext::new(&mut clock, &mut rng, &stop, RunConfig::default());
            PaletteSpin::new(5).run::<_, _, _, MAX_LEDS>(&mut driver, &mut ctx)
        };

        assert_eq!(outcome, Ok(Outcome::Cancelled));
        // Only the blank written on release
        assert_eq!(driver.frames, vec![vec![BLACK; 5]]);
    }
}
