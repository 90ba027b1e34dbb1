//! Shared sentinel constants for the policy wire format.
//!
//! Every component compares against these values when deciding whether a
//! predicate node is one of the recognized shapes. No logic lives here,
//! only the document paths, markers, and action names the role API uses.

/// Document path of the entity-type discriminator (`"Entry"` / `"Asset"`).
pub const DOC_ENTITY_TYPE: &str = "sys.type";

/// Document path of the content-type id an entry policy may be pinned to.
pub const DOC_CONTENT_TYPE: &str = "sys.contentType.sys.id";

/// Document path of a single entity's id.
pub const DOC_ENTITY_ID: &str = "sys.id";

/// Document path of the creating user's id.
pub const DOC_CREATED_BY: &str = "sys.createdBy.sys.id";

/// Document path of the metadata tag ids attached to an entity.
pub const DOC_TAG_IDS: &str = "metadata.tags.sys.id";

/// Document path of the metadata tag types attached to an entity.
pub const DOC_TAG_TYPES: &str = "metadata.tags.sys.tagType";

/// The bare metadata-tags path.
///
/// A path node carrying this document path constrains tag editing rather
/// than a `fields.<field>.<locale>` slice; the completeness validator never
/// treats it as a field reference.
pub const METADATA_TAGS_PATH: &str = "metadata.tags";

/// Separator between segments of a document path.
pub const PATH_SEPARATOR: &str = ".";

/// Wildcard segment inside a `fields.<field>.<locale>` path template.
pub const PATH_WILDCARD: &str = "%";

/// Leading segment of every field path template.
pub const PATH_FIELDS_PREFIX: &str = "fields";

/// Placeholder the role API substitutes with the acting user's id.
pub const CURRENT_USER: &str = "User.current()";

/// The literal action set meaning "every action".
pub const ACTION_ALL: &str = "all";

/// First half of the glued publish pair.
pub const ACTION_PUBLISH: &str = "publish";

/// Second half of the glued publish pair.
pub const ACTION_UNPUBLISH: &str = "unpublish";

/// First half of the glued archive pair.
pub const ACTION_ARCHIVE: &str = "archive";

/// Second half of the glued archive pair.
pub const ACTION_UNARCHIVE: &str = "unarchive";

/// The four action names that only ever persist as one of the two pairs.
pub const GLUED_ACTIONS: [&str; 4] = [
    ACTION_PUBLISH,
    ACTION_UNPUBLISH,
    ACTION_ARCHIVE,
    ACTION_UNARCHIVE,
];
