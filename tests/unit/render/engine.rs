use super::*;
use crate::kernel::SolidKernel;

fn coord_kernel(x: u32, y: u32, w: u32, h: u32) -> TileshadeResult<Color> {
    Ok(Color::new(
        x as f32 / w as f32,
        y as f32 / h as f32,
        0.25,
        1.0,
    ))
}

#[test]
fn split_targets_hands_each_tile_its_own_rows() {
    let (width, height, channels) = (7u32, 3u32, 2usize);
    let tiles = partition(width, height, PartitionScheme::VerticalStrips, 3).unwrap();
    let mut data = vec![0.0f32; (width * height) as usize * channels];

    let targets = split_targets(&mut data, width, channels, &tiles).unwrap();
    assert_eq!(targets.len(), 3);
    for (n, target) in targets.into_iter().enumerate() {
        assert_eq!(target.rows.len(), height as usize);
        for row in target.rows {
            assert_eq!(row.len(), target.tile.width() as usize * channels);
            row.fill(n as f32 + 1.0);
        }
    }

    // Strip widths 2, 2, 3.
    let first_row: Vec<f32> = data[..width as usize * channels].to_vec();
    assert_eq!(
        first_row,
        vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0]
    );
}

#[test]
fn split_targets_handles_grids_and_skips_empty_tiles() {
    let tiles = partition(3, 4, PartitionScheme::Grid { columns: 5, rows: 2 }, 1).unwrap();
    let mut data = vec![0.0f32; 12];
    let targets = split_targets(&mut data, 3, 1, &tiles).unwrap();
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| t.rows.len() == 2));
}

#[test]
fn split_targets_rejects_overlap() {
    let tiles = [Tile::new(0, 0, 3, 1), Tile::new(2, 0, 4, 1)];
    let mut data = vec![0.0f32; 4];
    assert!(matches!(
        split_targets(&mut data, 4, 1, &tiles),
        Err(TileshadeError::Validation(_))
    ));
}

#[test]
fn every_pixel_matches_direct_evaluation() {
    let mut renderer = Renderer::new(RenderOptions::with_workers(4)).unwrap();
    let buf = renderer.render(11, 5, 4, &coord_kernel).unwrap();
    for y in 0..5 {
        for x in 0..11 {
            let expected = coord_kernel(x, y, 11, 5).unwrap().to_array();
            assert_eq!(buf.pixel(x, y), &expected);
        }
    }
}

#[test]
fn fewer_channels_keep_leading_color_components() {
    let kernel = SolidKernel(Color::new(0.1, 0.2, 0.3, 0.4));
    let buf = render(4, 2, 3, &kernel, 2).unwrap();
    assert_eq!(buf.len(), 24);
    for px in buf.as_slice().chunks_exact(3) {
        assert_eq!(px, &[0.1, 0.2, 0.3]);
    }
}

#[test]
fn kernel_output_is_clamped() {
    let kernel = SolidKernel(Color::new(-2.0, 0.5, 3.0, 1.5));
    let buf = render(3, 3, 4, &kernel, 2).unwrap();
    for px in buf.as_slice().chunks_exact(4) {
        assert_eq!(px, &[0.0, 0.5, 1.0, 1.0]);
    }
}

#[test]
fn invalid_configuration_is_rejected_up_front() {
    assert!(matches!(
        Renderer::new(RenderOptions::with_workers(0)),
        Err(TileshadeError::Validation(_))
    ));
    assert!(matches!(
        Renderer::new(RenderOptions {
            partition: PartitionScheme::Grid { columns: 2, rows: 0 },
            ..RenderOptions::default()
        }),
        Err(TileshadeError::Validation(_))
    ));
    assert!(matches!(
        Renderer::new(RenderOptions::with_workers(MAX_WORKERS + 1)),
        Err(TileshadeError::Validation(_))
    ));
    assert!(matches!(
        render(2, 2, 4, &SolidKernel(Color::WHITE), 10_000_000),
        Err(TileshadeError::Validation(_))
    ));
    assert!(RenderOptions::with_workers(MAX_WORKERS).validate().is_ok());

    let called = AtomicBool::new(false);
    let kernel = |_: u32, _: u32, _: u32, _: u32| -> TileshadeResult<Color> {
        called.store(true, Ordering::Relaxed);
        Ok(Color::WHITE)
    };
    for channels in [0usize, 5] {
        assert!(matches!(
            render(2, 2, channels, &kernel, 1),
            Err(TileshadeError::Validation(_))
        ));
    }
    assert!(!called.load(Ordering::Relaxed));
}

#[test]
fn degenerate_sizes_render_nothing() {
    let called = AtomicBool::new(false);
    let kernel = |_: u32, _: u32, _: u32, _: u32| -> TileshadeResult<Color> {
        called.store(true, Ordering::Relaxed);
        Ok(Color::WHITE)
    };
    let mut renderer = Renderer::new(RenderOptions::with_workers(64)).unwrap();
    for (w, h) in [(0u32, 4u32), (4, 0), (0, 0)] {
        let (buf, stats) = renderer.render_with_stats(w, h, 4, &kernel).unwrap();
        assert!(buf.is_empty());
        assert_eq!(stats.tiles, 0);
        assert_eq!(stats.pixels, 0);
    }
    assert!(!called.load(Ordering::Relaxed));
    assert!(renderer.pool.is_none(), "no worker may be spawned for an empty image");

    assert!(matches!(
        renderer.render(0, 4, 0, &kernel),
        Err(TileshadeError::Validation(_))
    ));
    assert!(renderer.pool.is_none());
}

#[test]
fn worker_pool_starts_on_first_real_render_and_is_reused() {
    let mut renderer = Renderer::new(RenderOptions::with_workers(3)).unwrap();
    assert!(renderer.pool.is_none());

    renderer.render(6, 2, 4, &SolidKernel(Color::WHITE)).unwrap();
    assert_eq!(
        renderer.pool.as_ref().map(rayon::ThreadPool::current_num_threads),
        Some(3)
    );

    renderer.render(0, 2, 4, &SolidKernel(Color::WHITE)).unwrap();
    renderer.render(5, 5, 4, &SolidKernel(Color::BLACK)).unwrap();
    assert!(renderer.pool.is_some());
}

#[test]
fn stats_count_non_empty_tiles_and_pixels() {
    let mut renderer = Renderer::new(RenderOptions::with_workers(5)).unwrap();
    let kernel = SolidKernel(Color::BLACK);

    let (_, stats) = renderer.render_with_stats(13, 2, 4, &kernel).unwrap();
    assert_eq!(stats.tiles, 5);
    assert_eq!(stats.pixels, 26);

    let (_, narrow) = renderer.render_with_stats(3, 2, 4, &kernel).unwrap();
    assert_eq!(narrow.tiles, 1);
}

#[test]
fn kernel_failure_reports_the_pixel() {
    let kernel = |x: u32, y: u32, _: u32, _: u32| -> TileshadeResult<Color> {
        if (x, y) == (6, 2) {
            Err(TileshadeError::evaluation("bad pixel"))
        } else {
            Ok(Color::WHITE)
        }
    };
    let err = render(8, 4, 4, &kernel, 3).unwrap_err();
    match err {
        TileshadeError::KernelPixel { x, y, source } => {
            assert_eq!((x, y), (6, 2));
            assert!(matches!(*source, TileshadeError::Evaluation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn cancelled_token_aborts_the_render() {
    let token = CancelToken::new();
    token.cancel();
    let mut renderer = Renderer::new(RenderOptions {
        cancel: Some(token.clone()),
        ..RenderOptions::with_workers(2)
    })
    .unwrap();
    let err = renderer
        .render(16, 16, 4, &SolidKernel(Color::WHITE))
        .unwrap_err();
    assert!(matches!(err, TileshadeError::Cancelled));
    assert!(token.is_cancelled());
}

#[test]
fn cancelling_mid_render_stops_remaining_pixels() {
    let token = CancelToken::new();
    let trigger = token.clone();
    let kernel = move |x: u32, y: u32, _: u32, _: u32| -> TileshadeResult<Color> {
        if (x, y) == (0, 0) {
            trigger.cancel();
        }
        Ok(Color::WHITE)
    };
    let mut renderer = Renderer::new(RenderOptions {
        cancel: Some(token),
        ..RenderOptions::with_workers(1)
    })
    .unwrap();
    assert!(matches!(
        renderer.render(8, 8, 4, &kernel),
        Err(TileshadeError::Cancelled)
    ));
}

#[test]
fn options_round_trip_through_json_defaults() {
    let opts: RenderOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.workers, DEFAULT_WORKERS);
    assert_eq!(opts.partition, PartitionScheme::VerticalStrips);
    assert!(opts.cancel.is_none());

    let grid: RenderOptions = serde_json::from_str(
        r#"{ "workers": 2, "partition": { "kind": "grid", "columns": 3, "rows": 2 } }"#,
    )
    .unwrap();
    assert_eq!(grid.partition, PartitionScheme::Grid { columns: 3, rows: 2 });

    assert!(serde_json::from_str::<RenderOptions>(r#"{ "threads": 2 }"#).is_err());
}
