//! SQLite schema definition.

/// Complete database schema for the local front-desk store.
///
/// Derived identifiers are not unique: two registrations can legitimately
/// share one, so `patient_id` / `doctor_id` are indexed but not keys.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id TEXT NOT NULL,
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 0),
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    contact_number TEXT NOT NULL,
    address TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_patient_id ON patients(patient_id);

-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    doctor_id TEXT NOT NULL,
    name TEXT NOT NULL,
    contact_number TEXT NOT NULL,
    registration_number TEXT NOT NULL,
    opd_fees REAL NOT NULL CHECK (opd_fees >= 0),
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_doctors_doctor_id ON doctors(doctor_id);
"#;
