//! Property-based tests for P010 repacking.

use proptest::prelude::*;

use crate::image_pipeline::heif::types::{Plane, PlanarImage};
use crate::image_pipeline::p010::{PlaneRepacker, RawP010Writer, pack_sample, unpack_sample};

/// Luma geometry, padding per row, and raw samples covering the padded buffer.
fn padded_luma() -> impl Strategy<Value = (usize, usize, usize, Vec<u16>)> {
    (1usize..12, 1usize..12, 0usize..5).prop_flat_map(|(w, h, pad)| {
        let stride = w + pad;
        (
            Just(w),
            Just(h),
            Just(pad),
            prop::collection::vec(any::<u16>(), stride * h),
        )
    })
}

fn chroma_for(width: usize, height: usize, seed: u16) -> (Plane, Plane) {
    let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
    let blue = (0..cw * ch).map(|i| (i as u16).wrapping_mul(7).wrapping_add(seed)).collect();
    let red = (0..cw * ch).map(|i| (i as u16).wrapping_mul(13) ^ seed).collect();
    (
        Plane::new(cw, ch, cw, blue).unwrap(),
        Plane::new(cw, ch, cw, red).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_every_luma_word_is_masked_and_shifted((w, h, pad, samples) in padded_luma()) {
        let stride = w + pad;
        let luma = Plane::new(w, h, stride, samples.clone()).unwrap();
        let (cb, cr) = chroma_for(w, h, 1);
        let packed = PlaneRepacker::new().repack(&PlanarImage::new(luma, cb, cr, 10)).unwrap();

        prop_assert_eq!(packed.luma().len(), w * h);
        for y in 0..h {
            for x in 0..w {
                let word = packed.luma()[y * w + x];
                prop_assert_eq!(word, (samples[y * stride + x] & 0x3FF) << 6);
                prop_assert_eq!(word & 0x3F, 0);
            }
        }
    }

    #[test]
    fn test_unpack_recovers_ten_bit_sample(sample in any::<u16>()) {
        prop_assert_eq!(unpack_sample(pack_sample(sample)), sample & 0x3FF);
    }

    #[test]
    fn test_padding_does_not_change_output((w, h, pad, samples) in padded_luma(), filler in any::<u16>()) {
        let stride = w + pad;
        let compact: Vec<u16> = (0..h)
            .flat_map(|y| samples[y * stride..y * stride + w].iter().copied())
            .collect();
        let mut padded = samples.clone();
        for y in 0..h {
            for x in w..stride {
                padded[y * stride + x] = filler;
            }
        }

        let (cb, cr) = chroma_for(w, h, 3);
        let from_padded = PlaneRepacker::new()
            .repack(&PlanarImage::new(Plane::new(w, h, stride, padded).unwrap(), cb.clone(), cr.clone(), 10))
            .unwrap();
        let from_compact = PlaneRepacker::new()
            .repack(&PlanarImage::new(Plane::new(w, h, w, compact).unwrap(), cb, cr, 10))
            .unwrap();

        prop_assert_eq!(from_padded, from_compact);
    }

    #[test]
    fn test_chroma_pairs_are_never_swapped(w in 1usize..16, h in 1usize..16, seed in any::<u16>()) {
        let luma = Plane::new(w, h, w, vec![0; w * h]).unwrap();
        let (cb, cr) = chroma_for(w, h, seed);
        let packed = PlaneRepacker::new()
            .repack(&PlanarImage::new(luma, cb.clone(), cr.clone(), 10))
            .unwrap();

        let cw = cb.width();
        prop_assert_eq!(packed.chroma().len(), 2 * cw * cb.height());
        for y in 0..cb.height() {
            for x in 0..cw {
                prop_assert_eq!(packed.chroma()[2 * (y * cw + x)], pack_sample(cb.row(y)[x]));
                prop_assert_eq!(packed.chroma()[2 * (y * cw + x) + 1], pack_sample(cr.row(y)[x]));
            }
        }
    }

    #[test]
    fn test_raw_length_matches_geometry(w in 1usize..20, h in 1usize..20) {
        let luma = Plane::new(w, h, w, vec![512; w * h]).unwrap();
        let (cb, cr) = chroma_for(w, h, 0);
        let (cw, ch) = (cb.width(), cb.height());
        let packed = PlaneRepacker::new().repack(&PlanarImage::new(luma, cb, cr, 10)).unwrap();

        let mut output = Vec::new();
        RawP010Writer.write_packed(packed, &mut output).unwrap();

        prop_assert_eq!(output.len(), 2 * (w * h) + 2 * (2 * cw * ch));
    }
}
