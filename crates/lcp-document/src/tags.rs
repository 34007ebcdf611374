//! Element and attribute names of the lifecycle schema

/// `state` element
pub const STATE_TAG: &str = "state";
/// `data` element inside a state
pub const DATA_TAG: &str = "data";
/// `execution` element inside a data section
pub const EXECUTION_TAG: &str = "execution";
/// State identifier attribute
pub const ID_ATTR: &str = "id";
/// Triggering event attribute of `execution`
pub const FOR_EVENT_ATTR: &str = "forEvent";
/// Executor class attribute of `execution`
pub const CLASS_ATTR: &str = "class";
