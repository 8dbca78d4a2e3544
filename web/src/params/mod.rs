pub(crate) mod meeting;
