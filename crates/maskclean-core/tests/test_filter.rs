mod common;

use common::{frame_from_rows, noise_mask, params};
use maskclean_core::frame::{FrameMetadata, MaskFrame};
use maskclean_core::{CleanerConfig, MaskCleanError, MaskCleaner};
use ndarray::Array2;

fn cleaner(threshold: u8, min_length: usize, fade: usize) -> MaskCleaner {
    MaskCleaner::with_params(params(threshold, min_length, fade))
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = CleanerConfig {
        fade: -2,
        ..Default::default()
    };
    assert!(matches!(
        MaskCleaner::new(&config),
        Err(MaskCleanError::InvalidParameter(_))
    ));
}

#[test]
fn test_process_frame_cleans_and_keeps_metadata() {
    let src = frame_from_rows(&[&[240, 240, 240, 0, 0], &[0, 0, 0, 0, 250]]).with_metadata(
        FrameMetadata {
            frame_index: 7,
            timestamp_us: Some(1234),
        },
    );

    let (out, stats) = cleaner(235, 2, 0).process_frame_with_stats(&src).unwrap();

    assert_eq!(out.samples(), &[0, 240, 240, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(out.metadata, src.metadata);
    assert_eq!(stats.regions, 2);
    assert_eq!(stats.kept, 1);
}

#[test]
fn test_process_frame_does_not_modify_source() {
    let src = frame_from_rows(&[&[250, 250], &[250, 250]]);
    let before = src.clone();
    let _ = cleaner(235, 10, 0).process_frame(&src).unwrap();
    assert_eq!(src, before);
}

#[test]
fn test_process_frame_accepts_non_standard_layout() {
    // Transposed arrays are column-major; the frame normalises them.
    let data = Array2::from_shape_vec((3, 2), vec![240u8, 0, 240, 0, 240, 0]).unwrap();
    let frame = MaskFrame::new(data.reversed_axes());
    assert_eq!(frame.width(), 3);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.samples(), &[240, 240, 240, 0, 0, 0]);

    let out = cleaner(235, 2, 0).process_frame(&frame).unwrap();
    assert_eq!(out.samples(), &[0, 240, 240, 0, 0, 0]);
}

#[test]
fn test_process_frames_preserves_order() {
    let c = cleaner(200, 2, 3);
    let frames: Vec<MaskFrame> = (0..6)
        .map(|i| {
            let samples = noise_mask(20, 16, 50, i as u64);
            let data = Array2::from_shape_vec((16, 20), samples).unwrap();
            MaskFrame::new(data).with_metadata(FrameMetadata {
                frame_index: i,
                timestamp_us: None,
            })
        })
        .collect();

    let batch = c.process_frames(&frames).unwrap();

    assert_eq!(batch.len(), frames.len());
    for (i, (out, src)) in batch.iter().zip(&frames).enumerate() {
        assert_eq!(out.metadata.frame_index, i);
        assert_eq!(*out, c.process_frame(src).unwrap());
    }
}

#[test]
fn test_process_frames_small_batch_runs_sequentially() {
    let c = cleaner(235, 1, 0);
    let frames = vec![frame_from_rows(&[&[240, 240]]), frame_from_rows(&[&[0, 240]])];
    let batch = c.process_frames(&frames).unwrap();
    assert_eq!(batch[0].samples(), &[0, 240]);
    assert_eq!(batch[1].samples(), &[0, 0]);
}

#[test]
fn test_process_frames_empty_is_error() {
    let result = cleaner(235, 5, 0).process_frames(&[]);
    assert!(matches!(result, Err(MaskCleanError::EmptySequence)));
}
