//! Frame encoding and dispatch tests

use barco_projector::protocol::{checksum, ActionDispatcher, Frame, FrameEncoder, Parameter, ProtocolVariant};
use std::collections::BTreeMap;

fn opts(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// Every (action, options) pair the operator can choose
fn all_invocations() -> Vec<(&'static str, BTreeMap<String, String>)> {
    vec![
        ("lamp", opts(&[("lamp", "lamp_on")])),
        ("lamp", opts(&[("lamp", "lamp_off")])),
        ("shutter", opts(&[("shutter", "shutter_open")])),
        ("shutter", opts(&[("shutter", "shutter_close")])),
        ("lensShift", opts(&[("side", "0")])),
        ("lensShift", opts(&[("side", "1")])),
        ("lensShift", opts(&[("side", "0x02")])),
        ("lensShift", opts(&[("side", "0x03")])),
        ("lensZoom", opts(&[("zoom", "0")])),
        ("lensZoom", opts(&[("zoom", "1")])),
        ("lensFocus", opts(&[("focus", "0")])),
        ("lensFocus", opts(&[("focus", "1")])),
        ("macro", opts(&[("macro", "A")])),
        ("macro", opts(&[("macro", "Full Screen 4K")])),
    ]
}

#[test]
fn test_lamp_on_dp_frame() {
    let frame = FrameEncoder::encode(
        &[0x00, 0x03, 0x02, 0x76, 0x1a],
        Some(&Parameter::parse("1").unwrap()),
        ProtocolVariant::DpSeries2,
    )
    .unwrap();

    // (0 + 0x03 + 0x02 + 0x76 + 0x1a + 0x01) mod 256
    assert_eq!(
        frame.as_bytes(),
        &[0xfe, 0x00, 0x00, 0x03, 0x02, 0x76, 0x1a, 0x01, 0x96, 0xff]
    );
}

#[test]
fn test_lamp_off_dp_frame() {
    let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
    let frame = d.dispatch("lamp", &opts(&[("lamp", "lamp_off")])).unwrap();
    assert_eq!(
        frame.as_bytes(),
        &[0xfe, 0x00, 0x00, 0x03, 0x02, 0x76, 0x1a, 0x00, 0x95, 0xff]
    );
}

#[test]
fn test_lamp_on_hdx_frame() {
    let d = ActionDispatcher::new(ProtocolVariant::Hdx);
    let frame = d.dispatch("lamp", &opts(&[("lamp", "lamp_on")])).unwrap();
    assert_eq!(
        frame.as_bytes(),
        &[0xfe, 0x00, 0x00, 0x03, 0x02, 0x76, 0x1a, 0x01, 0x00, 0x96, 0xff]
    );
}

#[test]
fn test_shutter_close_literal() {
    let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
    let frame = d.dispatch("shutter", &opts(&[("shutter", "shutter_close")])).unwrap();
    assert_eq!(frame.as_bytes(), &[0xfe, 0x00, 0x23, 0x42, 0x00, 0x65, 0xff]);

    let frame = d.dispatch("shutter", &opts(&[("shutter", "shutter_open")])).unwrap();
    assert_eq!(frame.as_bytes(), &[0xfe, 0x00, 0x22, 0x42, 0x00, 0x64, 0xff]);
}

#[test]
fn test_legacy_shutter_close_keeps_historical_checksum() {
    let d = ActionDispatcher::new(ProtocolVariant::DpLegacy);
    let close = d.dispatch("shutter", &opts(&[("shutter", "shutter_close")])).unwrap();
    let open = d.dispatch("shutter", &opts(&[("shutter", "shutter_open")])).unwrap();
    assert_eq!(close.as_bytes(), &[0xfe, 0x00, 0x23, 0x42, 0x00, 0x64, 0xff]);
    assert_eq!(close.checksum(), open.checksum());
}

#[test]
fn test_hdx_shutter_open_frame() {
    let d = ActionDispatcher::new(ProtocolVariant::HdxSeries2);
    let frame = d.dispatch("shutter", &opts(&[("shutter", "shutter_open")])).unwrap();
    assert_eq!(
        frame.as_bytes(),
        &[0xfe, 0x00, 0x00, 0x03, 0x02, 0x22, 0x42, 0x00, 0x00, 0x69, 0xff]
    );
}

#[test]
fn test_macro_frame() {
    let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
    let frame = d.dispatch("macro", &opts(&[("macro", "A")])).unwrap();
    // (0xe8 + 0x81 + 0x41) mod 256
    assert_eq!(frame.as_bytes(), &[0xfe, 0x00, 0xe8, 0x81, 0x41, 0x00, 0xaa, 0xff]);
}

#[test]
fn test_lens_zoom_out_frame() {
    let d = ActionDispatcher::new(ProtocolVariant::DpSeries2);
    let frame = d.dispatch("lensZoom", &opts(&[("zoom", "1")])).unwrap();
    assert_eq!(frame.as_bytes(), &[0xfe, 0x00, 0xf4, 0x82, 0x01, 0x77, 0xff]);
}

#[test]
fn test_encoding_is_deterministic() {
    for variant in ProtocolVariant::ALL {
        let d = ActionDispatcher::new(variant);
        for (action, options) in all_invocations() {
            let first = d.dispatch(action, &options);
            let second = d.dispatch(action, &options);
            assert!(first.is_some(), "{} {:?} on {}", action, options, variant);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_checksum_property_for_encoded_frames() {
    for variant in ProtocolVariant::ALL {
        let d = ActionDispatcher::new(variant);
        let seed = variant.descriptor().seed;
        for (action, options) in all_invocations() {
            let command = d.resolve(action, &options).unwrap();
            let Some(opcodes) = command.opcodes() else {
                continue; // literal frame
            };
            let frame = command.to_frame(variant).unwrap();
            let parameter = match &command {
                barco_projector::protocol::CommandSpec::Encoded { parameter, .. } => {
                    parameter.as_ref().map(|p| p.as_bytes().to_vec()).unwrap_or_default()
                }
                _ => unreachable!(),
            };
            assert_eq!(
                frame.checksum(),
                Some(checksum(seed, &[opcodes, parameter.as_slice()])),
                "{} {:?} on {}",
                action,
                options,
                variant
            );
        }
    }
}

#[test]
fn test_frame_framing_bytes() {
    for variant in ProtocolVariant::ALL {
        let header = variant.descriptor().header;
        let d = ActionDispatcher::new(variant);
        for (action, options) in all_invocations() {
            let frame: Frame = d.dispatch(action, &options).unwrap();
            let bytes = frame.as_bytes();
            assert_eq!(&bytes[..2], &[0xfe, 0x00]);
            assert_eq!(bytes.last(), Some(&0xff));
            if variant.is_hdx() {
                assert_eq!(&bytes[..header.len()], header);
                assert_eq!(bytes[bytes.len() - 3], 0x00, "HDX filler");
            }
        }
    }
}

#[test]
fn test_unknown_action_yields_nothing() {
    for variant in ProtocolVariant::ALL {
        let d = ActionDispatcher::new(variant);
        assert!(d.dispatch("input", &opts(&[("source", "hdmi")])).is_none());
        assert!(d.dispatch("", &BTreeMap::new()).is_none());
    }
}
