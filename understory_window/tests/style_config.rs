// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading window styles and attribute records from configuration.

#![cfg(feature = "serde")]

use understory_window::{
    AttributeRecord, FeatureRegistry, FeatureSet, LayoutSize, PixelFormat, SoftInputState, Token,
    WindowFlags, WindowStyle, WindowType,
};

#[test]
fn partial_style_fills_in_defaults() {
    let style: WindowStyle = serde_json::from_str(
        r#"{
            "window_format": "Translucent",
            "close_on_touch_outside": true
        }"#,
    )
    .unwrap();

    assert_eq!(style.window_format, PixelFormat::Translucent);
    assert!(style.close_on_touch_outside);
    assert_eq!(style.dim_amount, WindowStyle::default().dim_amount);
    assert_eq!(style.soft_input_mode.state, SoftInputState::Unspecified);
}

#[test]
fn attribute_record_survives_a_config_round_trip() {
    let mut record = AttributeRecord::with_type(WindowType::APPLICATION_PANEL);
    record.token = Some(Token::new(12));
    record.title = "Panel:demo".into();
    record.flags = WindowFlags::DIM_BEHIND | WindowFlags::SECURE;
    record.width = LayoutSize::Exact(320);
    record.height = LayoutSize::WrapContent;

    let json = serde_json::to_string(&record).unwrap();
    let back: AttributeRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn feature_sets_use_flag_names() {
    let json = serde_json::to_string(&(FeatureSet::NO_TITLE | FeatureSet::ACTION_MODE_OVERLAY))
        .unwrap();
    assert_eq!(json, r#""NO_TITLE | ACTION_MODE_OVERLAY""#);
    let back: FeatureSet = serde_json::from_str(&json).unwrap();
    assert!(back.contains(FeatureSet::NO_TITLE));
}

#[test]
fn undefined_feature_bits_are_dropped_on_load() {
    let set: FeatureSet = serde_json::from_str(r#""0x100001""#).unwrap();
    assert_eq!(set, FeatureSet::OPTIONS_PANEL);

    let stray: FeatureSet = serde_json::from_str(r#""0x100000""#).unwrap();
    assert!(stray.is_empty());
    let registry = FeatureRegistry::new(stray);
    assert_eq!(registry.features(), FeatureSet::empty());
}
