//! Doctor database operations.

use rusqlite::{params, Row};

use super::{Database, DbResult};
use crate::models::Doctor;

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        doctor_id: row.get(0)?,
        name: row.get(1)?,
        contact_number: row.get(2)?,
        registration_number: row.get(3)?,
        opd_fees: row.get(4)?,
    })
}

impl Database {
    /// Insert a new doctor.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO doctors (
                doctor_id, name, contact_number, registration_number, opd_fees
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                doctor.doctor_id,
                doctor.name,
                doctor.contact_number,
                doctor.registration_number,
                doctor.opd_fees,
            ],
        )?;
        Ok(())
    }

    /// List all doctors in registration order.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT doctor_id, name, contact_number, registration_number, opd_fees
            FROM doctors
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], doctor_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
