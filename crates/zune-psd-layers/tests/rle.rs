/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

mod common;

use common::packbits_encode;
use nanorand::Rng;
use zune_psd_layers::rle::decode_rle;

fn round_trip(plane: &[u8]) {
    let packed = packbits_encode(plane);
    let mut output = vec![0; plane.len()];

    decode_rle(&packed, &mut output)
        .unwrap_or_else(|e| panic!("Could not decode plane of {} bytes, reason {:?}", plane.len(), e));

    assert_eq!(output, plane);
}

#[test]
fn test_round_trip_edge_lengths() {
    for length in [0, 1, 2, 3, 127, 128, 129, 255, 256, 257] {
        // one long run
        round_trip(&vec![0xAB; length]);
        // no runs at all
        let literal: Vec<u8> = (0..length).map(|x| (x % 251) as u8).collect();
        round_trip(&literal);
    }
}

#[test]
fn test_round_trip_random() {
    let mut rand = nanorand::WyRand::new();

    for _ in 0..50 {
        let length = rand.generate_range(0_usize..5000);
        // small alphabet so both runs and literals show up
        let plane: Vec<u8> = (0..length)
            .map(|_| rand.generate_range(0_u8..4))
            .collect();

        round_trip(&plane);
    }
}
