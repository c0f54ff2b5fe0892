// Test doubles for the verification pipeline collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use deedcheck::models::{AddressComponents, Entity, ParcelRecord, Valuation};
use deedcheck::services::{CollaboratorError, EntityExtractor, RegistryClient, RegistryError, TextExtractor};
use deedcheck::{Collaborators, MatchPolicy, Verifier};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const JURISDICTION: &str = "/us/tx/dallas";
pub const CORRUPT_IMAGE: &[u8] = b"corrupt";

pub const DEED_TEXT: &str = "WARRANTY DEED\n\
    Grantor: Alice Wong\n\
    Grantee: Robert Jones\n\
    Property: 123 Main St, Dallas, TX 75201\n";
pub const ID_TEXT: &str = "TEXAS DRIVER LICENSE\nROBERT JONES\nDOB 01/02/1970\n";

/// Maps image bytes to OCR text; unknown images read as empty text
#[derive(Default)]
pub struct StubText {
    pages: HashMap<Vec<u8>, String>,
}

impl StubText {
    pub fn with_page(mut self, image: &[u8], text: &str) -> Self {
        self.pages.insert(image.to_vec(), text.to_string());
        self
    }
}

#[async_trait]
impl TextExtractor for StubText {
    async fn extract_text(&self, image: &[u8]) -> Result<String, CollaboratorError> {
        if image == CORRUPT_IMAGE {
            return Err(CollaboratorError::ServiceError("cannot identify image file".into()));
        }
        Ok(self.pages.get(image).cloned().unwrap_or_default())
    }
}

/// Maps text to entities; unknown text has none
#[derive(Default)]
pub struct StubEntities {
    entities: HashMap<String, Vec<Entity>>,
}

impl StubEntities {
    pub fn with_entities(mut self, text: &str, entities: Vec<Entity>) -> Self {
        self.entities.insert(text.to_string(), entities);
        self
    }
}

#[async_trait]
impl EntityExtractor for StubEntities {
    async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>, CollaboratorError> {
        Ok(self.entities.get(text).cloned().unwrap_or_default())
    }
}

/// Canned registry behaviour
#[derive(Clone)]
pub enum RegistryReply {
    Found(ParcelRecord),
    NotFound,
    Status(u16),
    Malformed,
}

/// Registry double that records every lookup
pub struct SpyRegistry {
    reply: RegistryReply,
    calls: AtomicUsize,
    queries: Mutex<Vec<(String, String)>>,
}

impl SpyRegistry {
    pub fn new(reply: RegistryReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryClient for SpyRegistry {
    async fn lookup_parcel(&self, address: &str, jurisdiction: &str) -> Result<ParcelRecord, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap()
            .push((address.to_string(), jurisdiction.to_string()));

        match &self.reply {
            RegistryReply::Found(parcel) => Ok(parcel.clone()),
            RegistryReply::NotFound => Err(RegistryError::NotFound(address.to_string())),
            RegistryReply::Status(code) => Err(RegistryError::Status(*code)),
            RegistryReply::Malformed => Err(RegistryError::InvalidResponse("expected value at line 1".into())),
        }
    }
}

pub fn parcel(owner: &str, number: &str, street: &str, street_type: &str, city: &str, zip: &str) -> ParcelRecord {
    ParcelRecord {
        owner: owner.to_string(),
        address_components: AddressComponents {
            house_number: number.to_string(),
            street_name: street.to_string(),
            street_type: street_type.to_string(),
            city: city.to_string(),
            zip: zip.to_string(),
        },
        display_address: format!("{} {} {}, {}, {}", number, street, street_type, city, zip),
        valuation: Valuation {
            total: 315000.0,
            land: 90000.0,
            improvement: 225000.0,
        },
    }
}

pub fn robert_jones_parcel() -> ParcelRecord {
    parcel("ROBERT JONES", "123", "MAIN", "ST", "DALLAS", "75201")
}

pub fn person(name: &str) -> Entity {
    Entity::new(name, "PERSON")
}

/// Deed image `b"deed"` and ID image `b"id"` wired to the standard texts
pub fn standard_documents(deed_entities: Vec<Entity>, id_entities: Vec<Entity>) -> (StubText, StubEntities) {
    let text = StubText::default()
        .with_page(b"deed", DEED_TEXT)
        .with_page(b"id", ID_TEXT);
    let entities = StubEntities::default()
        .with_entities(DEED_TEXT, deed_entities)
        .with_entities(ID_TEXT, id_entities);
    (text, entities)
}

pub fn build_verifier(text: StubText, entities: StubEntities, registry: Arc<SpyRegistry>) -> Verifier {
    let collaborators = Collaborators {
        text: Arc::new(text),
        entities: Arc::new(entities),
        registry,
    };
    Verifier::new(collaborators, &MatchPolicy::default(), JURISDICTION).unwrap()
}
