//! Метаданные ASN.1-схемы: классы и номера тегов типов TD.57/TD.32.
//!
//! Идентификаторы пути в Error Context List берутся отсюда (номер тега без
//! двухбитного префикса класса), и DER-кодек использует те же константы при
//! записи идентификационных октетов.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    /// Два старших бита идентификационного октета.
    pub const fn bits(self) -> u8 {
        match self {
            TagClass::Universal => 0b0000_0000,
            TagClass::Application => 0b0100_0000,
            TagClass::ContextSpecific => 0b1000_0000,
            TagClass::Private => 0b1100_0000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub class: TagClass,
    pub number: u32,
}

impl Tag {
    pub const fn application(number: u32) -> Tag {
        Tag {
            class: TagClass::Application,
            number,
        }
    }

    /// Идентификатор элемента пути для Error Context (номер тега без класса).
    pub const fn path_item_id(self) -> u32 {
        self.number
    }
}

/// Номера тегов TD.57 (TAP3) и TD.32 (RAP), класс APPLICATION.
pub mod tag {
    use super::Tag;

    // --- TD.57: контейнеры Data Interchange ---
    pub const TRANSFER_BATCH: Tag = Tag::application(1);
    pub const NOTIFICATION: Tag = Tag::application(2);
    pub const CALL_EVENT_DETAIL_LIST: Tag = Tag::application(3);
    pub const BATCH_CONTROL_INFO: Tag = Tag::application(4);
    pub const ACCOUNTING_INFO: Tag = Tag::application(5);
    pub const NETWORK_INFO: Tag = Tag::application(6);
    pub const AUDIT_CONTROL_INFO: Tag = Tag::application(15);

    // --- TD.57: варианты звонков ---
    pub const MOBILE_ORIGINATED_CALL: Tag = Tag::application(9);
    pub const MOBILE_TERMINATED_CALL: Tag = Tag::application(10);
    pub const GPRS_CALL: Tag = Tag::application(14);

    // --- TD.57: поля Batch Control Info ---
    pub const SENDER: Tag = Tag::application(196);
    pub const RECIPIENT: Tag = Tag::application(182);
    pub const FILE_SEQUENCE_NUMBER: Tag = Tag::application(109);
    pub const FILE_AVAILABLE_TIME_STAMP: Tag = Tag::application(107);
    pub const FILE_CREATION_TIME_STAMP: Tag = Tag::application(108);
    pub const TRANSFER_CUT_OFF_TIME_STAMP: Tag = Tag::application(227);
    pub const SPECIFICATION_VERSION_NUMBER: Tag = Tag::application(201);
    pub const RELEASE_VERSION_NUMBER: Tag = Tag::application(189);
    pub const FILE_TYPE_INDICATOR: Tag = Tag::application(110);
    pub const RAP_FILE_SEQUENCE_NUMBER: Tag = Tag::application(181);
    pub const OPERATOR_SPEC_INFO_LIST: Tag = Tag::application(162);
    pub const OPERATOR_SPEC_INFORMATION: Tag = Tag::application(163);
    pub const LOCAL_TIME_STAMP: Tag = Tag::application(16);
    pub const UTC_TIME_OFFSET: Tag = Tag::application(231);

    // --- TD.57: Accounting Info ---
    pub const LOCAL_CURRENCY: Tag = Tag::application(135);
    pub const TAP_CURRENCY: Tag = Tag::application(214);
    pub const TAP_DECIMAL_PLACES: Tag = Tag::application(244);
    pub const TAXATION_LIST: Tag = Tag::application(217);
    pub const TAXATION: Tag = Tag::application(216);
    pub const TAX_CODE: Tag = Tag::application(212);
    pub const TAX_TYPE: Tag = Tag::application(218);
    pub const TAX_RATE: Tag = Tag::application(215);
    pub const DISCOUNTING_LIST: Tag = Tag::application(95);
    pub const DISCOUNTING: Tag = Tag::application(94);
    pub const DISCOUNT_CODE: Tag = Tag::application(96);
    pub const DISCOUNT_RATE: Tag = Tag::application(92);
    pub const CURRENCY_CONVERSION_LIST: Tag = Tag::application(80);
    pub const CURRENCY_CONVERSION: Tag = Tag::application(106);
    pub const EXCHANGE_RATE_CODE: Tag = Tag::application(105);
    pub const EXCHANGE_RATE: Tag = Tag::application(104);
    pub const NUMBER_OF_DECIMAL_PLACES: Tag = Tag::application(152);

    // --- TD.57: Network Info ---
    pub const UTC_TIME_OFFSET_INFO_LIST: Tag = Tag::application(235);
    pub const UTC_TIME_OFFSET_INFO: Tag = Tag::application(232);
    pub const UTC_TIME_OFFSET_CODE: Tag = Tag::application(233);
    pub const REC_ENTITY_INFO_LIST: Tag = Tag::application(188);
    pub const REC_ENTITY_INFORMATION: Tag = Tag::application(183);
    pub const REC_ENTITY_CODE: Tag = Tag::application(184);
    pub const REC_ENTITY_TYPE: Tag = Tag::application(186);
    pub const REC_ENTITY_ID: Tag = Tag::application(185);

    // --- TD.57: Audit Control Info ---
    pub const EARLIEST_CALL_TIME_STAMP: Tag = Tag::application(101);
    pub const LATEST_CALL_TIME_STAMP: Tag = Tag::application(133);
    pub const TOTAL_CHARGE: Tag = Tag::application(221);
    pub const TOTAL_CHARGE_REFUND: Tag = Tag::application(222);
    pub const TOTAL_DISCOUNT_REFUND: Tag = Tag::application(223);
    pub const TOTAL_DISCOUNT_VALUE: Tag = Tag::application(224);
    pub const TOTAL_TAX_REFUND: Tag = Tag::application(225);
    pub const TOTAL_TAX_VALUE: Tag = Tag::application(226);
    pub const TOTAL_ADVISED_CHARGE_VALUE_LIST: Tag = Tag::application(219);
    pub const ADVISED_CHARGE_VALUE: Tag = Tag::application(34);
    pub const ADVISED_CHARGE: Tag = Tag::application(33);
    pub const COMMISSION: Tag = Tag::application(72);
    pub const CHARGE_TYPE: Tag = Tag::application(71);
    pub const CALL_EVENT_DETAILS_COUNT: Tag = Tag::application(43);

    // --- TD.32: Return Batch ---
    pub const RETURN_BATCH: Tag = Tag::application(534);
    pub const RAP_BATCH_CONTROL_INFO: Tag = Tag::application(537);
    pub const RAP_FILE_CREATION_TIME_STAMP: Tag = Tag::application(526);
    pub const RAP_FILE_AVAILABLE_TIME_STAMP: Tag = Tag::application(525);
    pub const RAP_SPECIFICATION_VERSION_NUMBER: Tag = Tag::application(527);
    pub const RAP_RELEASE_VERSION_NUMBER: Tag = Tag::application(528);
    pub const RETURN_DETAIL_LIST: Tag = Tag::application(536);
    pub const FATAL_RETURN: Tag = Tag::application(547);
    pub const SEVERE_RETURN: Tag = Tag::application(548);
    pub const TRANSFER_BATCH_ERROR: Tag = Tag::application(549);
    pub const BATCH_CONTROL_ERROR: Tag = Tag::application(531);
    pub const ACCOUNTING_INFO_ERROR: Tag = Tag::application(530);
    pub const NETWORK_INFO_ERROR: Tag = Tag::application(532);
    pub const AUDIT_CONTROL_INFO_ERROR: Tag = Tag::application(529);
    pub const ERROR_DETAIL_LIST: Tag = Tag::application(542);
    pub const ERROR_DETAIL: Tag = Tag::application(541);
    pub const ERROR_CONTEXT_LIST: Tag = Tag::application(546);
    pub const ERROR_CONTEXT: Tag = Tag::application(540);
    pub const ERROR_CODE: Tag = Tag::application(544);
    pub const PATH_ITEM_ID: Tag = Tag::application(545);
    pub const ITEM_LEVEL: Tag = Tag::application(543);
    pub const RAP_AUDIT_CONTROL_INFO: Tag = Tag::application(538);
    pub const TOTAL_SEVERE_RETURN_VALUE: Tag = Tag::application(533);
    pub const RETURN_DETAILS_COUNT: Tag = Tag::application(535);
}
