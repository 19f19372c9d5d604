pub(crate) mod targets;
