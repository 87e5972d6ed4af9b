pub use super::action::Entity as Action;
pub use super::action_media::Entity as ActionMedia;
pub use super::action_pole_type::Entity as ActionPoleType;
pub use super::equipment::Entity as Equipment;
pub use super::geo_area::Entity as GeoArea;
pub use super::infrastructure::Entity as Infrastructure;
pub use super::infrastructure_geo_area::Entity as InfrastructureGeoArea;
pub use super::infrastructure_sensitive_area::Entity as InfrastructureSensitiveArea;
pub use super::media::Entity as Media;
pub use super::news::Entity as News;
pub use super::nomenclature::Entity as Nomenclature;
pub use super::partner::Entity as Partner;
pub use super::sensitive_area::Entity as SensitiveArea;
