// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod sales;
pub mod reports;
pub mod goals;
pub mod commissions;
pub mod catalog;
pub mod importer;
pub mod exporter;
pub mod doctor;
