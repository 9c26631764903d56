//! Repository for the `tickets` and `ticket_price_types` tables.
//!
//! Tickets are never deleted; after insert only the QR payload and the
//! `returned`/`verified` flags change.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use voskhod_core::types::DbId;

use crate::models::ticket::{CreateTicket, Ticket, TicketFilter, TicketLineRow};

const SELECT: &str = "SELECT t.id, t.shift_id, sh.operator_id, o.username AS operator_username, \
                             t.schedule_id, s.name AS ship_name, b.name AS berth_name, \
                             sc.start_time, sc.end_time, \
                             t.landing_place_id, lp.address AS landing_place_address, \
                             ARRAY(SELECT tpt.price_type_id \
                                   FROM ticket_price_types tpt \
                                   WHERE tpt.ticket_id = t.id \
                                   ORDER BY tpt.price_type_id) AS price_type_ids, \
                             t.ticket_day, t.adult_quantity, t.child_quantity, \
                             t.total_amount, t.bought, t.verified, t.returned, \
                             t.qr_payload, t.created_at, t.updated_at \
                      FROM tickets t \
                      JOIN shifts sh ON sh.id = t.shift_id \
                      JOIN operators o ON o.id = sh.operator_id \
                      JOIN ship_schedules sc ON sc.id = t.schedule_id \
                      JOIN ships s ON s.id = sc.ship_id \
                      LEFT JOIN berths b ON b.id = sc.berth_id \
                      LEFT JOIN landing_places lp ON lp.id = t.landing_place_id";

/// Provides persistence for sold tickets.
pub struct TicketRepo;

impl TicketRepo {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateTicket,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO tickets
                (shift_id, schedule_id, landing_place_id, ticket_day,
                 adult_quantity, child_quantity, total_amount, bought)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(input.shift_id)
        .bind(input.schedule_id)
        .bind(input.landing_place_id)
        .bind(input.ticket_day)
        .bind(input.adult_quantity)
        .bind(input.child_quantity)
        .bind(input.total_amount)
        .bind(input.bought)
        .fetch_one(executor)
        .await
    }

    pub async fn add_price_types<'e, E: PgExecutor<'e>>(
        executor: E,
        ticket_id: DbId,
        price_type_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ticket_price_types (ticket_id, price_type_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(ticket_id)
        .bind(price_type_ids)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn set_qr_payload<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        payload: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tickets SET qr_payload = $2 WHERE id = $1")
            .bind(id)
            .bind(payload)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("{SELECT} WHERE t.id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List tickets, newest first. `operator_id` restricts the listing to
    /// one cashier's shifts.
    pub async fn list(
        pool: &PgPool,
        operator_id: Option<DbId>,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!(
            "{SELECT}
             WHERE ($1::BIGINT IS NULL OR sh.operator_id = $1)
               AND ($2::BIGINT IS NULL OR t.shift_id = $2)
               AND ($3::DATE IS NULL OR t.ticket_day = $3)
             ORDER BY t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(operator_id)
            .bind(filter.shift_id)
            .bind(filter.ticket_day)
            .fetch_all(pool)
            .await
    }

    /// Passengers already sold (not returned) for one departure.
    pub async fn sold_passengers<'e, E: PgExecutor<'e>>(
        executor: E,
        schedule_id: DbId,
        ticket_day: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(adult_quantity + child_quantity), 0)::BIGINT
             FROM tickets
             WHERE schedule_id = $1 AND ticket_day = $2 AND NOT returned",
        )
        .bind(schedule_id)
        .bind(ticket_day)
        .fetch_one(executor)
        .await
    }

    /// The report-relevant columns of every ticket of a shift.
    pub async fn lines_for_shift<'e, E: PgExecutor<'e>>(
        executor: E,
        shift_id: DbId,
    ) -> Result<Vec<TicketLineRow>, sqlx::Error> {
        sqlx::query_as::<_, TicketLineRow>(
            "SELECT adult_quantity, child_quantity, total_amount, returned
             FROM tickets
             WHERE shift_id = $1",
        )
        .bind(shift_id)
        .fetch_all(executor)
        .await
    }

    /// Lock a ticket row. Returns `(shift_id, returned, verified, ticket_day)`.
    pub async fn lock<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<(DbId, bool, bool, NaiveDate)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT shift_id, returned, verified, ticket_day
             FROM tickets WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn mark_returned<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tickets SET returned = true WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn mark_verified<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tickets SET verified = true WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Whether an operator has sold any ticket.
    pub async fn exists_for_operator(pool: &PgPool, operator_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM tickets t
                JOIN shifts sh ON sh.id = t.shift_id
                WHERE sh.operator_id = $1
             )",
        )
        .bind(operator_id)
        .fetch_one(pool)
        .await
    }
}
