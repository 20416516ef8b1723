use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for c in Colormap::ALL {
        assert_eq!(c.name().parse::<Colormap>().unwrap(), c);
        assert_eq!(c.to_string(), c.name());
    }
    assert_eq!("  Viridis ".parse::<Colormap>().unwrap(), Colormap::Viridis);
}

#[test]
fn unknown_name_fails_with_supported_list() {
    let err = "rainbowz".parse::<Colormap>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("invalid parameter:"));
    assert!(msg.contains("rainbowz"));
    assert!(msg.contains("viridis"));
}

#[test]
fn jet_endpoints_and_middle() {
    assert_eq!(Colormap::Jet.sample(0.0), [0, 0, 128]);
    assert_eq!(Colormap::Jet.sample(1.0), [128, 0, 0]);
    let mid = Colormap::Jet.sample(0.5);
    assert!(mid[1] == 255, "jet midpoint should be fully green, got {mid:?}");
}

#[test]
fn stop_maps_hit_first_and_last_stop() {
    assert_eq!(Colormap::Viridis.sample(0.0), [0x44, 0x01, 0x54]);
    assert_eq!(Colormap::Viridis.sample(1.0), [0xfd, 0xe7, 0x25]);
    assert_eq!(Colormap::Coolwarm.sample(1.0), [0xb4, 0x04, 0x26]);
}

#[test]
fn gray_is_monotonic_and_input_is_clamped() {
    let mut prev = 0u8;
    for i in 0..=20 {
        let v = Colormap::Gray.sample(f64::from(i) / 20.0)[0];
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(Colormap::Gray.sample(-3.0), [0, 0, 0]);
    assert_eq!(Colormap::Gray.sample(9.0), [255, 255, 255]);
    assert_eq!(Colormap::Gray.sample(f64::NAN), [0, 0, 0]);
}

#[test]
fn serde_uses_lowercase_names_and_rejects_unknown() {
    let json = serde_json::to_string(&Colormap::Inferno).unwrap();
    assert_eq!(json, "\"inferno\"");
    let back: Colormap = serde_json::from_str("\"hot\"").unwrap();
    assert_eq!(back, Colormap::Hot);
    assert!(serde_json::from_str::<Colormap>("\"nope\"").is_err());
}
