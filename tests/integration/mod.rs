// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod mock;

mod test_api_e2e;
mod test_assistant_e2e;
mod test_retrieval_e2e;
