// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Custom assertions for register bus testing

/// Assert a 32-bit register read has the expected value
#[allow(dead_code)]
pub fn assert_reg32(address: u32, actual: u32, expected: u32) {
    assert_eq!(
        actual, expected,
        "Register 0x{:08X} mismatch: expected 0x{:08X}, got 0x{:08X}",
        address, expected, actual
    );
}

/// Assert a quadword read has the expected value
#[allow(dead_code)]
pub fn assert_qword(address: u32, actual: u128, expected: u128) {
    assert_eq!(
        actual, expected,
        "Quadword at 0x{:08X} mismatch: expected 0x{:032X}, got 0x{:032X}",
        address, expected, actual
    );
}
