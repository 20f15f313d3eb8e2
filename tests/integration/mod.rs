// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod fifo_queue_test;
pub mod priority_queue_test;
pub mod workload_test;
