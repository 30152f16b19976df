pub(crate) mod synchronizer;
