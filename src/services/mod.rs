// Service exports
pub mod collaborators;
pub mod ner;
pub mod regrid;
pub mod tesseract;

pub use collaborators::{CollaboratorError, EntityExtractor, RegistryClient, RegistryError, TextExtractor};
pub use ner::NerServiceClient;
pub use regrid::RegridClient;
pub use tesseract::TesseractExtractor;
