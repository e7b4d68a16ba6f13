// Copyright (c) tesseradb.org 2025
// This file is licensed under the AGPL-3.0-or-later

mod column;
mod index;
mod key;
mod schema;
mod table;
mod view;
