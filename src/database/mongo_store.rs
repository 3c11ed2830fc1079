use super::{BookingStore, MongoDB, UserStore, BOOKINGS_COLLECTION, USERS_COLLECTION};
use crate::models::{Booking, InsertResult, UpdateResult, User};
use crate::utils::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

/// Renders a stored document as plain JSON fields: ObjectIds become hex
/// strings, everything else uses relaxed extended JSON.
pub fn document_to_fields(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| {
            let json = match value {
                Bson::ObjectId(oid) => Value::String(oid.to_hex()),
                other => other.into_relaxed_extjson(),
            };
            (key, json)
        })
        .collect()
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    Ok(bson::to_document(value)?)
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

async fn collect_as<T: From<Map<String, Value>>>(
    cursor: mongodb::Cursor<Document>,
) -> Result<Vec<T>, AppError> {
    let documents: Vec<Document> = cursor.try_collect().await?;
    Ok(documents
        .into_iter()
        .map(|document| T::from(document_to_fields(document)))
        .collect())
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid id: {}", id)))
}

#[async_trait]
impl BookingStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        let cursor = self
            .collection::<Document>(BOOKINGS_COLLECTION)
            .find(doc! {})
            .await?;
        collect_as(cursor).await
    }

    async fn insert(&self, booking: Booking) -> Result<String, AppError> {
        let document = to_document(&booking)?;
        let result = self
            .collection::<Document>(BOOKINGS_COLLECTION)
            .insert_one(document)
            .await?;
        Ok(id_to_string(result.inserted_id))
    }

    async fn find_by_owner(&self, user_email: Option<&str>) -> Result<Vec<Booking>, AppError> {
        let filter = match user_email {
            Some(email) => doc! { "userEmail": email },
            None => doc! { "userEmail": Bson::Null },
        };
        let cursor = self
            .collection::<Document>(BOOKINGS_COLLECTION)
            .find(filter)
            .await?;
        collect_as(cursor).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        let object_id = parse_object_id(id)?;
        let document = self
            .collection::<Document>(BOOKINGS_COLLECTION)
            .find_one(doc! { "_id": object_id })
            .await?;
        Ok(document.map(|d| document_to_fields(d).into()))
    }

    async fn delete_by_owner(&self, user_email: &str) -> Result<u64, AppError> {
        let result = self
            .collection::<Document>(BOOKINGS_COLLECTION)
            .delete_many(doc! { "userEmail": user_email })
            .await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection::<Document>(USERS_COLLECTION)
            .find(doc! {})
            .await?;
        collect_as(cursor).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let document = self
            .collection::<Document>(USERS_COLLECTION)
            .find_one(doc! { "email": email })
            .await?;
        Ok(document.map(|d| document_to_fields(d).into()))
    }

    async fn insert(&self, user: User) -> Result<InsertResult, AppError> {
        let document = to_document(&user)?;
        let result = self
            .collection::<Document>(USERS_COLLECTION)
            .insert_one(document)
            .await?;
        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id_to_string(result.inserted_id),
        })
    }

    async fn upsert_role(&self, email: &str, role: &str) -> Result<UpdateResult, AppError> {
        let result = self
            .collection::<Document>(USERS_COLLECTION)
            .update_one(doc! { "email": email }, doc! { "$set": { "role": role } })
            .upsert(true)
            .await?;

        let upserted_id = result.upserted_id.map(id_to_string);
        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        })
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, AppError> {
        let result = self
            .collection::<Document>(USERS_COLLECTION)
            .delete_one(doc! { "email": email })
            .await?;
        Ok(result.deleted_count)
    }
}
