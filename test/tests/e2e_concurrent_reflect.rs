//! S5: a callback thread floods one object with reflections during a
//! cycle; the simulator thread drains every item exactly once, clears the
//! received flags, and a mid-drain rewind never duplicates work.

use std::{sync::Arc, thread};

use fedlink::{
    AttributeBinding, AttributeConfig, AttributeItem, DataRecord, Encoding, ItemQueue,
    ObjectError, ObjectInstance,
};

const ITEM_COUNT: usize = 10_000;

struct CountingRecord {
    consumed: usize,
}

impl DataRecord for CountingRecord {
    fn pack(&mut self, _object: &ObjectInstance) -> Result<(), ObjectError> {
        Ok(())
    }

    fn unpack(&mut self, object: &ObjectInstance) -> Result<(), ObjectError> {
        let received = object.with_attribute(0, |attribute| {
            if attribute.is_received() {
                attribute.clear_received();
                true
            } else {
                false
            }
        })?;
        if received {
            self.consumed += 1;
        }
        Ok(())
    }
}

fn flooded_object() -> Arc<ObjectInstance> {
    let object = Arc::new(ObjectInstance::new("VehicleState", "vehicle-x"));
    object
        .configure_attributes(
            vec![AttributeBinding::new(
                "position",
                "state.position",
                AttributeConfig::Cyclic,
                Encoding::Opaque,
            )],
            false,
        )
        .unwrap();
    object
}

#[test]
fn test_ten_thousand_reflections_drain_once() {
    let object = flooded_object();

    // The "RTI callback thread" floods the queue during one sim cycle
    let producer_object = Arc::clone(&object);
    let producer = thread::spawn(move || {
        for sequence in 0..ITEM_COUNT as u32 {
            producer_object
                .enqueue_reflection(&[(0, sequence.to_be_bytes().to_vec())])
                .unwrap();
        }
    });
    producer.join().unwrap();

    assert_eq!(object.pending_reflections(), ITEM_COUNT);
    assert!(object.with_attribute(0, |attribute| attribute.is_received()).unwrap());

    // Simulator thread: drain, then unpack
    let consumed = object.drain_reflections().unwrap();
    assert_eq!(consumed, ITEM_COUNT);
    assert_eq!(object.pending_reflections(), 0);

    let mut record = CountingRecord { consumed: 0 };
    record.unpack(&object).unwrap();
    assert_eq!(record.consumed, 1);
    assert!(!object.with_attribute(0, |attribute| attribute.is_received()).unwrap());

    // The last pushed value won
    let final_value = object
        .with_attribute(0, |attribute| attribute.encoded())
        .unwrap()
        .unwrap();
    assert_eq!(final_value, ((ITEM_COUNT - 1) as u32).to_be_bytes().to_vec());
}

#[test]
fn test_rewind_mid_drain_never_duplicates() {
    let queue: ItemQueue<AttributeItem> = ItemQueue::new();
    for sequence in 0..ITEM_COUNT as u32 {
        queue
            .push(AttributeItem::copied_from(0, &sequence.to_be_bytes()))
            .unwrap();
    }

    let mut seen = vec![false; ITEM_COUNT];
    let mut drained = 0usize;
    while let Some(item) = queue.pop().unwrap() {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&item.data);
        let sequence = u32::from_be_bytes(bytes) as usize;
        assert!(!seen[sequence], "item {} delivered twice", sequence);
        seen[sequence] = true;
        drained += 1;

        // Fault injection: a spurious rewind halfway through the drain
        if drained == ITEM_COUNT / 2 {
            queue.rewind().unwrap();
        }
    }

    assert_eq!(drained, ITEM_COUNT);
    assert!(seen.into_iter().all(|was_seen| was_seen));
    assert_eq!(queue.size().unwrap(), 0);
}

#[test]
fn test_concurrent_producer_and_consumer() {
    let queue: Arc<ItemQueue<AttributeItem>> = Arc::new(ItemQueue::new());

    let producer_queue = Arc::clone(&queue);
    let producer = thread::spawn(move || {
        for sequence in 0..ITEM_COUNT as u32 {
            producer_queue
                .push(AttributeItem::copied_from(0, &sequence.to_be_bytes()))
                .unwrap();
        }
    });

    // Consumer races the producer; sum of pops equals sum of pushes (P4)
    let mut drained = 0usize;
    let mut last_sequence = -1i64;
    while drained < ITEM_COUNT {
        if let Some(item) = queue.pop().unwrap() {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&item.data);
            let sequence = u32::from_be_bytes(bytes) as i64;
            assert!(sequence > last_sequence, "out-of-order delivery");
            last_sequence = sequence;
            drained += 1;
        } else {
            thread::yield_now();
        }
    }

    producer.join().unwrap();
    assert_eq!(queue.size().unwrap(), 0);
    assert_eq!(drained, ITEM_COUNT);
}
