// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

pub mod catalog;
pub mod ddl;
pub mod internal;
