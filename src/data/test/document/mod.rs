use crate::data::document::DocumentRepository;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory::create_document};

mod create_if_missing;
mod find;
mod upsert;
