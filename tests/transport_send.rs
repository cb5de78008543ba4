use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use periphlink::peripheral::{
    FlowControl, GpioConfig, Parity, PeripheralConfig, PeripheralType, PinDirection, StopBits,
    UartConfig,
};
use periphlink::transport::{
    ConfigTransport, IngestAck, RecordStore, StoredRecord, TransportRecord,
};

/// In-memory store that records every call, standing in for the backend.
#[derive(Default)]
struct MockStore {
    submitted: Mutex<Vec<TransportRecord>>,
    type_queries: Mutex<Vec<PeripheralType>>,
}

#[async_trait]
impl RecordStore for MockStore {
    async fn submit(&self, record: &TransportRecord) -> periphlink::transport::Result<IngestAck> {
        self.submitted.lock().unwrap().push(record.clone());
        Ok(IngestAck {
            id: "rec-1".to_string(),
            received_at: Some(Utc::now()),
        })
    }

    async fn last(&self) -> periphlink::transport::Result<Option<StoredRecord>> {
        Ok(None)
    }

    async fn history(&self) -> periphlink::transport::Result<Vec<StoredRecord>> {
        Ok(Vec::new())
    }

    async fn history_by_type(
        &self,
        ptype: PeripheralType,
    ) -> periphlink::transport::Result<Vec<StoredRecord>> {
        self.type_queries.lock().unwrap().push(ptype);
        Ok(Vec::new())
    }
}

fn uart_config() -> PeripheralConfig {
    PeripheralConfig::Uart(UartConfig {
        instance: "UART2".to_string(),
        baud_rate: 115200,
        data_bits: 8,
        parity: Parity::None,
        stop_bits: StopBits::One,
        flow_control: FlowControl::None,
        dma_enabled: false,
        interrupt_enabled: false,
        auto_baud: false,
        oversampling: 16,
        tx_buffer_size: 64,
        rx_buffer_size: 64,
        tx_pin: "PA2".to_string(),
        rx_pin: "PA3".to_string(),
        rts_pin: None,
        cts_pin: None,
    })
}

#[tokio::test]
async fn test_send_builds_record_and_submits_once() {
    let transport = ConfigTransport::new(MockStore::default());
    let before = Utc::now();

    let ack = transport.send("mcu-0042", &uart_config()).await.unwrap();
    assert_eq!(ack.id, "rec-1");

    let submitted = transport.store().submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);

    let record = &submitted[0];
    assert_eq!(record.peripheral_type, PeripheralType::Uart);
    assert_eq!(record.instance, "UART2");
    assert_eq!(record.mcu_id, "mcu-0042");
    assert_eq!(record.data.len(), 32 + 4);
    assert_eq!(record.data[0], 0xAA);
    assert_eq!(record.data[2], 32);
    assert_eq!(*record.data.last().unwrap(), 0x55);
    assert!(record.timestamp >= before && record.timestamp <= Utc::now());
}

#[tokio::test]
async fn test_send_skips_store_when_packing_fails() {
    let transport = ConfigTransport::new(MockStore::default());

    let mut bad_pin = uart_config();
    if let PeripheralConfig::Uart(ref mut c) = bad_pin {
        c.rx_pin = "PAX".to_string();
    }
    let err = transport.send("mcu-0042", &bad_pin).await.unwrap_err();
    assert!(err.to_string().contains("rxPin"));

    let mut bad_domain = uart_config();
    if let PeripheralConfig::Uart(ref mut c) = bad_domain {
        c.data_bits = 12;
    }
    let err = transport.send("mcu-0042", &bad_domain).await.unwrap_err();
    assert!(err.to_string().contains("dataBits"));

    assert!(transport.store().submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_gpio_instance_label_is_its_pin() {
    let transport = ConfigTransport::new(MockStore::default());
    let config = PeripheralConfig::Gpio(GpioConfig {
        pin: "PA5".to_string(),
        direction: PinDirection::Input,
        pull_up: false,
        pull_down: true,
    });

    transport.send("mcu-0042", &config).await.unwrap();

    let submitted = transport.store().submitted.lock().unwrap();
    assert_eq!(submitted[0].instance, "PA5");
    assert_eq!(submitted[0].peripheral_type, PeripheralType::Gpio);
}

#[tokio::test]
async fn test_history_by_type_passes_filter_through() {
    let transport = ConfigTransport::new(MockStore::default());

    let records = transport
        .history_by_type(PeripheralType::Spi)
        .await
        .unwrap();
    assert!(records.is_empty());
    assert_eq!(
        *transport.store().type_queries.lock().unwrap(),
        vec![PeripheralType::Spi]
    );
}

#[tokio::test]
async fn test_record_wire_shape() {
    let transport = ConfigTransport::new(MockStore::default());
    transport.send("mcu-0042", &uart_config()).await.unwrap();

    let submitted = transport.store().submitted.lock().unwrap();
    let json = serde_json::to_value(&submitted[0]).unwrap();

    assert_eq!(json["peripheral_type"], "UART");
    assert_eq!(json["instance"], "UART2");
    assert_eq!(json["mcu_id"], "mcu-0042");
    assert_eq!(json["configuration"]["peripheral"], "UART");
    assert_eq!(json["configuration"]["baudRate"], 115200);
    assert!(json["data"].as_array().unwrap().len() == 36);
    assert_eq!(json["data"][0], 0xAA);

    // ISO-8601 timestamp string.
    let ts = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}
