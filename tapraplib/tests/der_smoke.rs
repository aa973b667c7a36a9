use tapraplib::formats::der::encode_return_batch;
use tapraplib::model::DateTimeStamp;
use tapraplib::rap::{
    ErrorContext, ErrorDetail, FatalError, FatalReturn, RapAuditControlInfo, RapBatchControlInfo,
    ReturnBatch, ReturnDetail, SevereReturn, TransferBatchError,
};

/// Мини-разбор TLV для проверок: (номер тега, constructed, содержимое).
#[derive(Debug)]
struct Tlv<'a> {
    number: u32,
    constructed: bool,
    content: &'a [u8],
}

fn parse_tlv<'a>(buf: &'a [u8], pos: &mut usize) -> Tlv<'a> {
    let first = buf[*pos];
    *pos += 1;
    let constructed = first & 0x20 != 0;
    let mut number = u32::from(first & 0x1F);
    if number == 0x1F {
        number = 0;
        loop {
            let b = buf[*pos];
            *pos += 1;
            number = (number << 7) | u32::from(b & 0x7F);
            if b & 0x80 == 0 {
                break;
            }
        }
    }
    let mut len = usize::from(buf[*pos]);
    *pos += 1;
    if len & 0x80 != 0 {
        let count = len & 0x7F;
        len = 0;
        for _ in 0..count {
            len = (len << 8) | usize::from(buf[*pos]);
            *pos += 1;
        }
    }
    let content = &buf[*pos..*pos + len];
    *pos += len;
    Tlv {
        number,
        constructed,
        content,
    }
}

fn children(content: &[u8]) -> Vec<Tlv<'_>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < content.len() {
        out.push(parse_tlv(content, &mut pos));
    }
    out
}

fn child<'a>(list: &'a [Tlv<'a>], number: u32) -> &'a Tlv<'a> {
    list.iter()
        .find(|tlv| tlv.number == number)
        .unwrap_or_else(|| panic!("tag {number} not found"))
}

fn sample_batch() -> ReturnBatch {
    let stamp = DateTimeStamp::new("20260801120000", "+0300");
    ReturnBatch {
        rap_batch_control_info: RapBatchControlInfo {
            sender: "OP2".into(),
            recipient: "OP1".into(),
            rap_file_sequence_number: "00001".into(),
            rap_file_creation_time_stamp: stamp.clone(),
            rap_file_available_time_stamp: stamp,
            rap_specification_version_number: 1,
            rap_release_version_number: 5,
            specification_version_number: Some(3),
            release_version_number: Some(12),
            file_type_indicator: None,
            tap_decimal_places: Some(6),
            operator_spec_information: None,
        },
        return_details: vec![ReturnDetail::Fatal(FatalReturn {
            file_sequence_number: "00042".into(),
            error: FatalError::TransferBatch(TransferBatchError {
                error_detail: vec![ErrorDetail {
                    error_code: 31,
                    error_context: vec![ErrorContext {
                        path_item_id: 1,
                        item_level: 1,
                    }],
                }],
            }),
        })],
        rap_audit_control_info: RapAuditControlInfo {
            total_severe_return_value: vec![0x00],
            return_details_count: 1,
            operator_spec_information: None,
        },
    }
}

#[test]
fn envelope_uses_long_form_application_tag() {
    let bytes = encode_return_batch(&sample_batch()).expect("encode");
    // APPLICATION | constructed | long-form, затем base-128 номера 534
    assert_eq!(bytes[0], 0x7F);
    assert_eq!(bytes[1], 0x84);
    assert_eq!(bytes[2], 0x16);

    let mut pos = 0;
    let top = parse_tlv(&bytes, &mut pos);
    assert_eq!(top.number, 534);
    assert!(top.constructed);
    assert_eq!(pos, bytes.len(), "no trailing bytes");
}

#[test]
fn header_fields_and_minimal_integers() {
    let bytes = encode_return_batch(&sample_batch()).expect("encode");
    let mut pos = 0;
    let top = parse_tlv(&bytes, &mut pos);
    let groups = children(top.content);
    assert_eq!(groups.len(), 3);

    let header = children(child(&groups, 537).content);
    assert_eq!(child(&header, 196).content, b"OP2");
    assert_eq!(child(&header, 182).content, b"OP1");
    assert_eq!(child(&header, 181).content, b"00001");
    // INTEGER в кратчайшей форме
    assert_eq!(child(&header, 527).content, [0x01]);
    assert_eq!(child(&header, 528).content, [0x05]);
    assert_eq!(child(&header, 244).content, [0x06]);

    let creation = children(child(&header, 526).content);
    assert_eq!(child(&creation, 16).content, b"20260801120000");
    assert_eq!(child(&creation, 231).content, b"+0300");

    let audit = children(child(&groups, 538).content);
    assert_eq!(child(&audit, 533).content, [0x00]);
    assert_eq!(child(&audit, 535).content, [0x01]);
}

#[test]
fn fatal_return_carries_error_detail_path() {
    let bytes = encode_return_batch(&sample_batch()).expect("encode");
    let mut pos = 0;
    let top = parse_tlv(&bytes, &mut pos);
    let groups = children(top.content);

    let details = children(child(&groups, 536).content);
    let fatal = children(child(&details, 547).content);
    assert_eq!(child(&fatal, 109).content, b"00042");

    let error = children(child(&fatal, 549).content);
    let detail_list = children(child(&error, 542).content);
    let detail = children(child(&detail_list, 541).content);
    assert_eq!(child(&detail, 544).content, [31]);

    let contexts = children(child(&detail, 546).content);
    let context = children(child(&contexts, 540).content);
    assert_eq!(child(&context, 545).content, [0x01]);
    assert_eq!(child(&context, 543).content, [0x01]);
}

#[test]
fn long_form_length_for_large_content() {
    let mut batch = sample_batch();
    batch.rap_audit_control_info.operator_spec_information =
        Some(vec!["x".repeat(200), "y".repeat(90)]);
    let bytes = encode_return_batch(&batch).expect("encode");

    let mut pos = 0;
    let top = parse_tlv(&bytes, &mut pos);
    assert_eq!(pos, bytes.len());
    let groups = children(top.content);
    let audit = children(child(&groups, 538).content);
    let spec_list = children(child(&audit, 162).content);
    assert_eq!(spec_list.len(), 2);
    assert_eq!(spec_list[0].content.len(), 200);
}

#[test]
fn severe_return_stub_is_encodable() {
    let mut batch = sample_batch();
    batch.return_details = vec![ReturnDetail::Severe(SevereReturn {
        file_sequence_number: "00042".into(),
        operator_spec_information: Some(vec!["IOT".into()]),
        error_detail: vec![ErrorDetail {
            error_code: 84,
            error_context: Vec::new(),
        }],
    })];
    let bytes = encode_return_batch(&batch).expect("encode");

    let mut pos = 0;
    let top = parse_tlv(&bytes, &mut pos);
    let groups = children(top.content);
    let details = children(child(&groups, 536).content);
    let severe = children(child(&details, 548).content);
    assert_eq!(child(&severe, 109).content, b"00042");
    assert_eq!(child(&children(child(&severe, 162).content), 163).content, b"IOT");
}
