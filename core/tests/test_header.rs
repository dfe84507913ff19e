// Info header suite. Covers:

// * common preamble validation and its error order
// * per-revision layouts and fixed sizes
// * attribute decoding, including absent vs. false
// * encode -> decode inverse for every revision
// * error message formatting

#[cfg(test)]
mod tests {
    use fsp_core::constants::{component_attr, HEADER_V1_LEN, HEADER_V2_LEN};
    use fsp_core::headers::{
        decode_common_header, decode_header_v1, decode_header_v3, decode_info_header,
        encode_header_v1, encode_header_v2, encode_header_v3, encode_header_v4,
        encode_info_header, ComponentType, FspHeader, HeaderError, HeaderErrorKind,
        HeaderRevision, InfoHeader, InfoHeaderV1, InfoHeaderV2, InfoHeaderV3, InfoHeaderV4,
        SpecVersion,
    };
    use fsp_core::utils::fmt_bytes;
    use proptest::prelude::*;

    fn v3_with_component(component_attribute: u16) -> InfoHeaderV3 {
        let mut h = InfoHeaderV3::test_header();
        h.component_attribute = component_attribute;
        h
    }

// ## 1️⃣ Common preamble

    #[test]
    fn short_buffers_are_too_short() {
        for len in 0..12 {
            let buf = vec![0u8; len];
            assert_eq!(
                decode_info_header(&buf).unwrap_err(),
                HeaderError::TooShort { have: len, need: 12 }
            );
        }
    }

    #[test]
    fn bad_signature_is_rejected() {
        let mut wire = encode_header_v2(&InfoHeaderV2::test_header());
        wire[0..4].copy_from_slice(b"FSPX");

        match decode_info_header(&wire) {
            Err(HeaderError::BadSignature { have, need }) => {
                assert_eq!(&have, b"FSPX");
                assert_eq!(&need, b"FSPH");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_signature_wins_over_short_layout() {
        // 12 bytes is enough for the preamble checks.
        let buf = *b"NOPE\x48\x00\x00\x00\x00\x00\x21\x04";
        assert_eq!(decode_info_header(&buf).unwrap_err().kind(), HeaderErrorKind::BadSignature);
    }

    #[test]
    fn reserved_nonzero_is_rejected() {
        let mut wire = encode_header_v2(&InfoHeaderV2::test_header());
        wire[9] = 0x80;
        assert_eq!(
            decode_info_header(&wire).unwrap_err(),
            HeaderError::ReservedNonzero { raw: 0x8000 }
        );
    }

    #[test]
    fn unknown_revisions_are_rejected() {
        for raw in [0u8, 5, 0x10, 0xFF] {
            let mut wire = encode_header_v2(&InfoHeaderV2::test_header());
            wire[11] = raw;
            assert_eq!(
                decode_info_header(&wire).unwrap_err(),
                HeaderError::UnknownRevision { raw }
            );
        }
    }

    #[test]
    fn common_header_decodes_preamble_only() {
        let wire = encode_header_v3(&InfoHeaderV3::test_header());
        let common = decode_common_header(&wire[..12]).unwrap();

        assert_eq!(&common.signature, b"FSPH");
        assert_eq!(common.header_length, 72);
        assert_eq!(common.revision().unwrap(), HeaderRevision::V3);
        assert_eq!(common.spec_version.to_string(), "2.0");
    }

    #[test]
    fn preamble_ok_but_layout_truncated() {
        let wire = encode_header_v2(&InfoHeaderV2::test_header());
        assert_eq!(
            decode_info_header(&wire[..HEADER_V2_LEN - 1]).unwrap_err(),
            HeaderError::TooShort { have: HEADER_V2_LEN - 1, need: HEADER_V2_LEN }
        );
    }

    #[test]
    fn spec_version_is_packed_bcd() {
        let v = SpecVersion(0x21);
        assert_eq!((v.major(), v.minor()), (2, 1));
        assert_eq!(v.to_string(), "2.1");
        assert_eq!(SpecVersion(0x10).to_string(), "1.0");
    }

// ## 2️⃣ Revision layouts

    #[test]
    fn v1_decodes_without_attributes() {
        let h = InfoHeaderV1::test_header();
        let wire = encode_header_v1(&h);
        assert_eq!(wire.len(), HEADER_V1_LEN);

        let decoded = decode_info_header(&wire).unwrap();
        assert_eq!(decoded, InfoHeader::V1(h));
        assert_eq!(decoded.revision(), HeaderRevision::V1);
        assert_eq!(decoded.image_size(), 0x0002_0000);
        assert!(decoded.image_attributes().is_none());
        assert!(decoded.component_attributes().is_none());
    }

    #[test]
    fn v1_needs_only_64_bytes() {
        let wire = encode_header_v1(&InfoHeaderV1::test_header());
        assert!(decode_info_header(&wire[..64]).is_ok());
        assert!(decode_header_v1(&wire[..63]).is_err());
    }

    #[test]
    fn v1_field_offsets() {
        let wire = encode_header_v1(&InfoHeaderV1::test_header());
        assert_eq!(&wire[16..24], b"TESTFSP1");
        assert_eq!(&wire[24..28], &0x0002_0000u32.to_le_bytes());
        assert_eq!(&wire[48..52], &0x400u32.to_le_bytes());
    }

    #[test]
    fn v2_exposes_graphics_only() {
        let mut h = InfoHeaderV2::test_header();
        h.image_attribute = 0b0011;
        let decoded = decode_info_header(&encode_header_v2(&h)).unwrap();

        let attrs = decoded.image_attributes().unwrap();
        assert_eq!(attrs.graphics_support, Some(true));
        assert_eq!(attrs.dispatch_mode_support, None);
        assert!(decoded.component_attributes().is_none());
    }

    #[test]
    fn v2_graphics_unset_is_false_not_absent() {
        let mut h = InfoHeaderV2::test_header();
        h.image_attribute = 0;
        let attrs = decode_info_header(&encode_header_v2(&h)).unwrap().image_attributes().unwrap();
        assert_eq!(attrs.graphics_support, Some(false));
    }

    #[test]
    fn v3_component_attributes() {
        let decoded = decode_info_header(&encode_header_v3(&InfoHeaderV3::test_header())).unwrap();

        let ca = decoded.component_attributes().unwrap();
        assert!(ca.release_build);
        assert!(!ca.official_release);
        assert_eq!(ca.component_type, ComponentType::M);
        assert_eq!(ca.type_code, 2);

        let ia = decoded.image_attributes().unwrap();
        assert_eq!(ia.graphics_support, Some(false));
        assert_eq!(ia.dispatch_mode_support, None);
    }

    #[test]
    fn v3_attribute_halves_are_16_bit() {
        let mut h = InfoHeaderV3::test_header();
        h.image_attribute = 0x0001;
        h.component_attribute = 0x3003;
        let wire = encode_header_v3(&h);
        assert_eq!(&wire[32..34], &[0x01u8, 0x00]);
        assert_eq!(&wire[34..36], &[0x03u8, 0x30]);
    }

    #[test]
    fn component_type_codes() {
        let cases = [
            (0x1u16, ComponentType::T),
            (0x2, ComponentType::M),
            (0x3, ComponentType::S),
            (0x8, ComponentType::O),
        ];
        for (code, expected) in cases {
            let h = v3_with_component(code << component_attr::TYPE_SHIFT);
            assert_eq!(h.component_attributes().unwrap().component_type, expected);
        }
    }

    #[test]
    fn unassigned_component_type_is_reserved() {
        for code in [0x0u16, 0x4, 0x5, 0x7, 0x9, 0xF] {
            let h = v3_with_component(code << component_attr::TYPE_SHIFT);
            let decoded = decode_info_header(&encode_header_v3(&h)).unwrap();
            let ca = decoded.component_attributes().unwrap();
            assert_eq!(ca.component_type, ComponentType::Reserved);
            assert_eq!(ca.type_code as u16, code);
        }
    }

    #[test]
    fn component_type_names() {
        assert_eq!(ComponentType::T.to_string(), "FSP-T");
        assert_eq!(ComponentType::O.to_string(), "FSP-O");
        assert_eq!(ComponentType::Reserved.to_string(), "FSP-ReservedType");
    }

    #[test]
    fn v4_reads_dispatch_mode() {
        let mut h = InfoHeaderV4::test_header();
        h.layout.image_attribute = 0b0011;
        let decoded = decode_info_header(&encode_header_v4(&h)).unwrap();

        let attrs = decoded.image_attributes().unwrap();
        assert_eq!(attrs.graphics_support, Some(true));
        assert_eq!(attrs.dispatch_mode_support, Some(true));

        let ca = decoded.component_attributes().unwrap();
        assert!(ca.release_build && ca.official_release);
        assert_eq!(ca.component_type, ComponentType::S);
    }

    #[test]
    fn v4_dispatch_unset_is_false() {
        let mut h = InfoHeaderV4::test_header();
        h.layout.image_attribute = 0b0001;
        let attrs = h.image_attributes().unwrap();
        assert_eq!(attrs.graphics_support, Some(true));
        assert_eq!(attrs.dispatch_mode_support, Some(false));
    }

    #[test]
    fn revision_decoders_do_not_revalidate() {
        let mut wire = encode_header_v3(&InfoHeaderV3::test_header());
        wire[9] = 1;
        assert!(decode_header_v3(&wire).is_ok());
        assert!(decode_info_header(&wire).is_err());
    }

// ## 3️⃣ Encode -> decode inverse

    #[test]
    fn encode_info_header_uses_fixed_sizes() {
        let headers: [InfoHeader; 4] = [
            InfoHeaderV1::test_header().into(),
            InfoHeaderV2::test_header().into(),
            InfoHeaderV3::test_header().into(),
            InfoHeaderV4::test_header().into(),
        ];
        for h in headers {
            let wire = encode_info_header(&h);
            assert_eq!(wire.len(), h.fixed_len());
            assert_eq!(decode_info_header(&wire).unwrap(), h);
        }
    }

    fn arb_v3() -> impl Strategy<Value = InfoHeaderV3> {
        (any::<[u32; 11]>(), any::<[u8; 8]>(), any::<u16>(), any::<u16>(), any::<u8>()).prop_map(
            |(w, image_id, image_attribute, component_attribute, spec)| {
                let mut h = InfoHeaderV3::test_header();
                h.common.header_length = w[0];
                h.common.spec_version = SpecVersion(spec);
                h.image_revision = w[1];
                h.image_id = image_id;
                h.image_size = w[2];
                h.image_base = w[3];
                h.image_attribute = image_attribute;
                h.component_attribute = component_attribute;
                h.cfg_region_offset = w[4];
                h.cfg_region_size = w[5];
                h.reserved2 = w[6];
                h.temp_ram_init_entry_offset = w[7];
                h.reserved3 = w[8];
                h.notify_phase_entry_offset = w[9];
                h.fsp_memory_init_entry_offset = w[10];
                h
            },
        )
    }

    proptest! {
        #[test]
        fn prop_v1_inverse(words in any::<[u32; 11]>(), image_id in any::<[u8; 8]>()) {
            let mut h = InfoHeaderV1::test_header();
            h.image_revision = words[0];
            h.image_id = image_id;
            h.image_size = words[1];
            h.image_base = words[2];
            h.image_attribute = words[3];
            h.cfg_region_offset = words[4];
            h.cfg_region_size = words[5];
            h.api_entry_num = words[6];
            h.temp_ram_init_entry_offset = words[7];
            h.fsp_init_entry_offset = words[8];
            h.notify_phase_entry_offset = words[9];
            h.reserved = words[10];
            prop_assert_eq!(decode_info_header(&encode_header_v1(&h)).unwrap(), InfoHeader::V1(h));
        }

        #[test]
        fn prop_v2_inverse(words in any::<[u32; 14]>()) {
            let mut h = InfoHeaderV2::test_header();
            h.image_revision = words[0];
            h.image_size = words[1];
            h.image_base = words[2];
            h.image_attribute = words[3];
            h.cfg_region_offset = words[4];
            h.cfg_region_size = words[5];
            h.api_entry_num = words[6];
            h.temp_ram_init_entry_offset = words[7];
            h.fsp_init_entry_offset = words[8];
            h.notify_phase_entry_offset = words[9];
            h.fsp_memory_init_entry_offset = words[10];
            h.temp_ram_exit_entry_offset = words[11];
            h.fsp_silicon_init_entry_offset = words[12];
            h.common.header_length = words[13];
            prop_assert_eq!(decode_info_header(&encode_header_v2(&h)).unwrap(), InfoHeader::V2(h));
        }

        #[test]
        fn prop_v3_inverse(h in arb_v3()) {
            prop_assert_eq!(decode_info_header(&encode_header_v3(&h)).unwrap(), InfoHeader::V3(h));
        }

        #[test]
        fn prop_v4_inverse(layout in arb_v3()) {
            let mut layout = layout;
            layout.common.header_revision = 4;
            let h = InfoHeaderV4 { layout };
            prop_assert_eq!(decode_info_header(&encode_header_v4(&h)).unwrap(), InfoHeader::V4(h));
        }

        #[test]
        fn prop_decode_never_panics(buf in proptest::collection::vec(any::<u8>(), 0..160)) {
            let _ = decode_info_header(&buf);
        }
    }

// ## 4️⃣ Formatting & diagnostics

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(
            HeaderError::TooShort { have: 3, need: 12 }.to_string(),
            "header buffer too short: 3 < 12"
        );
        assert_eq!(
            HeaderError::BadSignature { have: *b"FSPE", need: *b"FSPH" }.to_string(),
            r#"invalid signature: expected b"FSPH", got b"FSPE""#
        );
        assert_eq!(
            HeaderError::UnknownRevision { raw: 9 }.to_string(),
            "unknown header revision: 0x09"
        );
    }

    #[test]
    fn fmt_bytes_binary() {
        assert_eq!(fmt_bytes(&[0x00, 0xFF, 0x01, 0x02]), "0x00ff0102");
    }
}
