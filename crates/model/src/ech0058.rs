//! eCH-0058 message headers, v5 and v4.
//!
//! Both versions share one content model; v5 adds `namedMetaData`. The
//! version-neutral [`Header`] is wrapped by [`HeaderV5`] or [`HeaderV4`],
//! which pick the namespace every header child is written in.

use chrono::{NaiveDate, NaiveDateTime};
use ech_wire::{
    FieldReader, FieldSlot, FieldWriter, NodeSchema, Result, WireError, WireNode, wire_string,
};

use crate::codes::Action;
use crate::namespaces::{ECH_0058_V4, ECH_0058_V5};

wire_string! {
    pub struct MessageId { min: 1, max: 36 }
}

wire_string! {
    pub struct DeclarationLocalReference { min: 1, max: 100 }
}

wire_string! {
    pub struct BusinessProcessId { min: 1, max: 128 }
}

wire_string! {
    /// Our/your business reference and business transaction id.
    pub struct BusinessReferenceId { min: 1, max: 50 }
}

wire_string! {
    pub struct SubMessageType { min: 1, max: 36 }
}

wire_string! {
    pub struct Subject { min: 1, max: 100 }
}

wire_string! {
    pub struct Comment { min: 1, max: 250 }
}

wire_string! {
    /// Manufacturer or product name of the sending application.
    pub struct ApplicationName { min: 1, max: 30 }
}

wire_string! {
    pub struct ProductVersion { min: 1, max: 10 }
}

wire_string! {
    pub struct UniqueIdDelivery { min: 1, max: 50 }
}

wire_string! {
    pub struct MetaDataName { min: 1, max: 20 }
}

wire_string! {
    pub struct MetaDataValue { min: 1, max: 50 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendingApplication {
    pub manufacturer: ApplicationName,
    pub product: ApplicationName,
    pub product_version: ProductVersion,
}

const SENDING_APPLICATION_SLOTS: &[FieldSlot] = &[
    FieldSlot::value("manufacturer"),
    FieldSlot::value("product"),
    FieldSlot::value("productVersion"),
];

impl SendingApplication {
    fn write_to(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("manufacturer", &self.manufacturer)?;
        w.value("product", &self.product)?;
        w.value("productVersion", &self.product_version)
    }

    fn read_from(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            manufacturer: r.value("manufacturer")?,
            product: r.value("product")?,
            product_version: r.value("productVersion")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartialDelivery {
    pub unique_id_delivery: UniqueIdDelivery,
    pub total_number_of_packages: u32,
    pub number_of_actual_package: u32,
}

const PARTIAL_DELIVERY_SLOTS: &[FieldSlot] = &[
    FieldSlot::value("uniqueIdDelivery"),
    FieldSlot::value("totalNumberOfPackages"),
    FieldSlot::value("numberOfActualPackage"),
];

impl PartialDelivery {
    fn write_to(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("uniqueIdDelivery", &self.unique_id_delivery)?;
        w.value("totalNumberOfPackages", &self.total_number_of_packages)?;
        w.value("numberOfActualPackage", &self.number_of_actual_package)
    }

    fn read_from(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            unique_id_delivery: r.value("uniqueIdDelivery")?,
            total_number_of_packages: r.value("totalNumberOfPackages")?,
            number_of_actual_package: r.value("numberOfActualPackage")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedMetaData {
    pub name: MetaDataName,
    pub value: MetaDataValue,
}

const NAMED_META_DATA_SLOTS: &[FieldSlot] = &[
    FieldSlot::value("metaDataName"),
    FieldSlot::value("metaDataValue"),
];

impl NamedMetaData {
    fn write_to(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("metaDataName", &self.name)?;
        w.value("metaDataValue", &self.value)
    }

    fn read_from(r: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            name: r.value("metaDataName")?,
            value: r.value("metaDataValue")?,
        })
    }
}

/// Declares a private wrapper that writes `$inner` in a fixed namespace.
macro_rules! versioned_node {
    ($wrapper:ident, $inner:ty, $schema:ident, $type_name:literal, $ns:expr, $slots:expr) => {
        struct $wrapper($inner);

        static $schema: NodeSchema = NodeSchema {
            type_name: $type_name,
            namespace: $ns,
            slots: $slots,
        };

        impl WireNode for $wrapper {
            fn schema() -> &'static NodeSchema {
                &$schema
            }

            fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
                self.0.write_to(w)
            }

            fn read_fields(r: &mut FieldReader) -> Result<Self> {
                <$inner>::read_from(r).map($wrapper)
            }
        }
    };
}

versioned_node!(
    SendingApplicationV5,
    SendingApplication,
    SENDING_APPLICATION_V5,
    "sendingApplicationType",
    ECH_0058_V5,
    SENDING_APPLICATION_SLOTS
);
versioned_node!(
    SendingApplicationV4,
    SendingApplication,
    SENDING_APPLICATION_V4,
    "sendingApplicationType",
    ECH_0058_V4,
    SENDING_APPLICATION_SLOTS
);
versioned_node!(
    PartialDeliveryV5,
    PartialDelivery,
    PARTIAL_DELIVERY_V5,
    "partialDeliveryType",
    ECH_0058_V5,
    PARTIAL_DELIVERY_SLOTS
);
versioned_node!(
    PartialDeliveryV4,
    PartialDelivery,
    PARTIAL_DELIVERY_V4,
    "partialDeliveryType",
    ECH_0058_V4,
    PARTIAL_DELIVERY_SLOTS
);
versioned_node!(
    NamedMetaDataV5,
    NamedMetaData,
    NAMED_META_DATA_V5,
    "namedMetaDataType",
    ECH_0058_V5,
    NAMED_META_DATA_SLOTS
);

/// `headerType` content, independent of the header version.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub sender_id: String,
    pub original_sender_id: Option<String>,
    pub declaration_local_reference: Option<DeclarationLocalReference>,
    pub recipient_id: Vec<String>,
    pub message_id: MessageId,
    pub reference_message_id: Option<MessageId>,
    pub business_process_id: Option<BusinessProcessId>,
    pub our_business_reference_id: Option<BusinessReferenceId>,
    pub your_business_reference_id: Option<BusinessReferenceId>,
    pub unique_id_business_transaction: Option<BusinessReferenceId>,
    pub message_type: String,
    pub sub_message_type: Option<SubMessageType>,
    pub sending_application: SendingApplication,
    pub partial_delivery: Option<PartialDelivery>,
    pub subject: Option<Subject>,
    pub comment: Option<Comment>,
    pub message_date: NaiveDateTime,
    pub initial_message_date: Option<NaiveDateTime>,
    pub event_date: Option<NaiveDate>,
    pub modification_date: Option<NaiveDate>,
    pub action: Action,
    pub test_delivery_flag: bool,
    pub response_expected: Option<bool>,
    pub business_case_closed: Option<bool>,
    /// Only carried by v5 headers.
    pub named_meta_data: Vec<NamedMetaData>,
}

impl Header {
    /// Writes every scalar child; nested children are written per version.
    fn write_values(&self, w: &mut FieldWriter) -> Result<()> {
        w.value("senderId", &self.sender_id)?;
        w.opt_value("originalSenderId", &self.original_sender_id)?;
        w.opt_value("declarationLocalReference", &self.declaration_local_reference)?;
        w.values("recipientId", &self.recipient_id)?;
        w.value("messageId", &self.message_id)?;
        w.opt_value("referenceMessageId", &self.reference_message_id)?;
        w.opt_value("businessProcessId", &self.business_process_id)?;
        w.opt_value("ourBusinessReferenceId", &self.our_business_reference_id)?;
        w.opt_value("yourBusinessReferenceId", &self.your_business_reference_id)?;
        w.opt_value(
            "uniqueIdBusinessTransaction",
            &self.unique_id_business_transaction,
        )?;
        w.value("messageType", &self.message_type)?;
        w.opt_value("subMessageType", &self.sub_message_type)?;
        w.opt_value("subject", &self.subject)?;
        w.opt_value("comment", &self.comment)?;
        w.value("messageDate", &self.message_date)?;
        w.opt_value("initialMessageDate", &self.initial_message_date)?;
        w.opt_value("eventDate", &self.event_date)?;
        w.opt_value("modificationDate", &self.modification_date)?;
        w.value("action", &self.action)?;
        w.value("testDeliveryFlag", &self.test_delivery_flag)?;
        w.opt_value("responseExpected", &self.response_expected)?;
        w.opt_value("businessCaseClosed", &self.business_case_closed)
    }

    fn read_values(
        r: &mut FieldReader,
        sending_application: SendingApplication,
        partial_delivery: Option<PartialDelivery>,
        named_meta_data: Vec<NamedMetaData>,
    ) -> Result<Self> {
        Ok(Self {
            sender_id: r.value("senderId")?,
            original_sender_id: r.opt_value("originalSenderId")?,
            declaration_local_reference: r.opt_value("declarationLocalReference")?,
            recipient_id: r.values("recipientId")?,
            message_id: r.value("messageId")?,
            reference_message_id: r.opt_value("referenceMessageId")?,
            business_process_id: r.opt_value("businessProcessId")?,
            our_business_reference_id: r.opt_value("ourBusinessReferenceId")?,
            your_business_reference_id: r.opt_value("yourBusinessReferenceId")?,
            unique_id_business_transaction: r.opt_value("uniqueIdBusinessTransaction")?,
            message_type: r.value("messageType")?,
            sub_message_type: r.opt_value("subMessageType")?,
            sending_application,
            partial_delivery,
            subject: r.opt_value("subject")?,
            comment: r.opt_value("comment")?,
            message_date: r.value("messageDate")?,
            initial_message_date: r.opt_value("initialMessageDate")?,
            event_date: r.opt_value("eventDate")?,
            modification_date: r.opt_value("modificationDate")?,
            action: r.value("action")?,
            test_delivery_flag: r.value("testDeliveryFlag")?,
            response_expected: r.opt_value("responseExpected")?,
            business_case_closed: r.opt_value("businessCaseClosed")?,
            named_meta_data,
        })
    }
}

macro_rules! header_slots {
    ($($tail:expr),* $(,)?) => {
        &[
            FieldSlot::value("senderId"),
            FieldSlot::value("originalSenderId").optional(),
            FieldSlot::value("declarationLocalReference").optional(),
            FieldSlot::value("recipientId").repeated(),
            FieldSlot::value("messageId"),
            FieldSlot::value("referenceMessageId").optional(),
            FieldSlot::value("businessProcessId").optional(),
            FieldSlot::value("ourBusinessReferenceId").optional(),
            FieldSlot::value("yourBusinessReferenceId").optional(),
            FieldSlot::value("uniqueIdBusinessTransaction").optional(),
            FieldSlot::value("messageType"),
            FieldSlot::value("subMessageType").optional(),
            FieldSlot::node("sendingApplication"),
            FieldSlot::node("partialDelivery").optional(),
            FieldSlot::value("subject").optional(),
            FieldSlot::value("comment").optional(),
            FieldSlot::value("messageDate"),
            FieldSlot::value("initialMessageDate").optional(),
            FieldSlot::value("eventDate").optional(),
            FieldSlot::value("modificationDate").optional(),
            FieldSlot::value("action"),
            FieldSlot::value("testDeliveryFlag"),
            FieldSlot::value("responseExpected").optional(),
            FieldSlot::value("businessCaseClosed").optional(),
            $($tail),*
        ]
    };
}

static HEADER_V5: NodeSchema = NodeSchema {
    type_name: "headerType",
    namespace: ECH_0058_V5,
    slots: header_slots![FieldSlot::node("namedMetaData").repeated()],
};

static HEADER_V4: NodeSchema = NodeSchema {
    type_name: "headerType",
    namespace: ECH_0058_V4,
    slots: header_slots![],
};

/// Header written in the eCH-0058 v5 namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderV5(pub Header);

impl WireNode for HeaderV5 {
    fn schema() -> &'static NodeSchema {
        &HEADER_V5
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        let header = &self.0;
        header.write_values(w)?;
        w.node(
            "sendingApplication",
            &SendingApplicationV5(header.sending_application.clone()),
        )?;
        w.opt_node(
            "partialDelivery",
            &header.partial_delivery.clone().map(PartialDeliveryV5),
        )?;
        let named: Vec<NamedMetaDataV5> = header
            .named_meta_data
            .iter()
            .cloned()
            .map(NamedMetaDataV5)
            .collect();
        w.nodes("namedMetaData", &named)
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        let sending_application = r.node::<SendingApplicationV5>("sendingApplication")?.0;
        let partial_delivery = r
            .opt_node::<PartialDeliveryV5>("partialDelivery")?
            .map(|p| p.0);
        let named_meta_data = r
            .nodes::<NamedMetaDataV5>("namedMetaData")?
            .into_iter()
            .map(|m| m.0)
            .collect();
        Header::read_values(r, sending_application, partial_delivery, named_meta_data).map(HeaderV5)
    }
}

/// Header written in the eCH-0058 v4 namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderV4(pub Header);

impl WireNode for HeaderV4 {
    fn schema() -> &'static NodeSchema {
        &HEADER_V4
    }

    fn write_fields(&self, w: &mut FieldWriter) -> Result<()> {
        let header = &self.0;
        if !header.named_meta_data.is_empty() {
            return Err(WireError::constraint(
                format!("{}/namedMetaData", w.path()),
                "eCH-0058 v4 headers carry no named metadata",
            ));
        }
        header.write_values(w)?;
        w.node(
            "sendingApplication",
            &SendingApplicationV4(header.sending_application.clone()),
        )?;
        w.opt_node(
            "partialDelivery",
            &header.partial_delivery.clone().map(PartialDeliveryV4),
        )
    }

    fn read_fields(r: &mut FieldReader) -> Result<Self> {
        let sending_application = r.node::<SendingApplicationV4>("sendingApplication")?.0;
        let partial_delivery = r
            .opt_node::<PartialDeliveryV4>("partialDelivery")?
            .map(|p| p.0);
        Header::read_values(r, sending_application, partial_delivery, Vec::new()).map(HeaderV4)
    }
}
