pub mod associations;
pub mod coord;
pub mod errors;
pub mod model;
pub mod modules;
pub mod path;
pub mod rewriter;
pub mod scope;
mod stream;

pub use associations::{associated_properties, ArtifactAssociation, PropertyAssociations};
pub use coord::ArtifactCoords;
pub use errors::PomError;
pub use model::Project;
pub use modules::{child_modules, remove_missing_modules};
pub use rewriter::PomRewriter;
pub use scope::APACHE_MAVEN_PLUGINS_GROUP_ID;
