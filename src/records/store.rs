//! In-process document store for contact records.
//!
//! Six keyed collections behind `parking_lot` locks; every read and
//! create is scoped to the owning user id from the validated token.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::models::{AddressRecord, EmailRecord, PayerRecord, ReceiverRecord};

/// Which party a contact record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Payer,
    Receiver,
}

#[derive(Default)]
pub struct RecordStore {
    payers: RwLock<HashMap<Uuid, PayerRecord>>,
    receivers: RwLock<HashMap<Uuid, ReceiverRecord>>,
    payer_addresses: RwLock<HashMap<Uuid, AddressRecord>>,
    receiver_addresses: RwLock<HashMap<Uuid, AddressRecord>>,
    payer_emails: RwLock<HashMap<Uuid, EmailRecord>>,
    receiver_emails: RwLock<HashMap<Uuid, EmailRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_payer(&self, user_id: &str, name: &str) -> PayerRecord {
        let record = PayerRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.payers.write().insert(record.id, record.clone());
        record
    }

    pub fn create_receiver(&self, user_id: &str, name: &str) -> ReceiverRecord {
        let record = ReceiverRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.receivers.write().insert(record.id, record.clone());
        record
    }

    pub fn create_address(&self, party: Party, user_id: &str, address: &str) -> AddressRecord {
        let record = AddressRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            address: address.to_string(),
            created_at: Utc::now(),
        };
        self.addresses(party).write().insert(record.id, record.clone());
        record
    }

    pub fn create_email(&self, party: Party, user_id: &str, email: &str) -> EmailRecord {
        let record = EmailRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        self.emails(party).write().insert(record.id, record.clone());
        record
    }

    pub fn payers_for(&self, user_id: &str) -> Vec<PayerRecord> {
        let mut records: Vec<_> = self
            .payers
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    pub fn receivers_for(&self, user_id: &str) -> Vec<ReceiverRecord> {
        let mut records: Vec<_> = self
            .receivers
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    pub fn addresses_for(&self, party: Party, user_id: &str) -> Vec<AddressRecord> {
        let mut records: Vec<_> = self
            .addresses(party)
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    pub fn emails_for(&self, party: Party, user_id: &str) -> Vec<EmailRecord> {
        let mut records: Vec<_> = self
            .emails(party)
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    fn addresses(&self, party: Party) -> &RwLock<HashMap<Uuid, AddressRecord>> {
        match party {
            Party::Payer => &self.payer_addresses,
            Party::Receiver => &self.receiver_addresses,
        }
    }

    fn emails(&self, party: Party) -> &RwLock<HashMap<Uuid, EmailRecord>> {
        match party {
            Party::Payer => &self.payer_emails,
            Party::Receiver => &self.receiver_emails,
        }
    }
}
