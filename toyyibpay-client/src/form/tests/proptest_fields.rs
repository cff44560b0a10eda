use proptest::prelude::*;

use crate::bill::{BillOption, BillRequest};
use crate::form::encode;

const OMIT_WHEN_EMPTY: [&str; 11] = [
    "billDescription",
    "billReturnUrl",
    "billTo",
    "billChargeToPrepaid",
    "billContentEmail",
    "billExpiryDate",
    "billExpiryDays",
    "enableFPXB2B",
    "chargeFPXB2B",
    "billSplitPayment",
    "billSplitPaymentArgs",
];

const ALWAYS_PRESENT: [&str; 11] = [
    "categoryCode",
    "billAmount",
    "billName",
    "billExternalReferenceNo",
    "billCallbackUrl",
    "billPayorInfo",
    "billEmail",
    "billPhone",
    "billPriceSetting",
    "billChargeToCustomer",
    "billPaymentChannel",
];

fn omitted_value(request: &BillRequest, name: &str) -> Option<String> {
    let value = match name {
        "billDescription" => request.description.clone(),
        "billReturnUrl" => request.return_url.clone(),
        "billTo" => request.payer_name.clone(),
        "billChargeToPrepaid" => request.charge_to_prepaid.to_string(),
        "billContentEmail" => request.email_content.clone(),
        "billExpiryDate" => request.expiry_date.clone(),
        "billExpiryDays" => request.expiry_days.to_string(),
        "enableFPXB2B" => request.enable_corporate_fpx.to_string(),
        "chargeFPXB2B" => request.charge_corporate_fpx.to_string(),
        "billSplitPayment" => request.split_payment.to_string(),
        "billSplitPaymentArgs" => request.split_payment_args.clone(),
        _ => return None,
    };
    (!value.is_empty() && value != "0").then_some(value)
}

fn arb_request() -> impl Strategy<Value = BillRequest> {
    (
        ("[A-Za-z0-9]{0,8}", any::<u64>(), "[A-Za-z0-9 _]{0,30}", "[A-Za-z0-9 _]{0,30}"),
        ("[a-z]{0,6}", "[a-z]{0,6}", 0u32..3, 0u32..3),
        ("[a-z]{0,6}", 0u32..101, 0u32..2, 0u32..2),
        ("[a-z]{0,6}", "[a-z]{0,6}", 0u32..2),
    )
        .prop_map(
            |(
                (category, amount, title, description),
                (return_url, payer_name, prepaid, channel),
                (expiry_date, expiry_days, enable, charge),
                (email_content, split_args, split),
            )| BillRequest {
                category_code: category,
                amount,
                title,
                description,
                return_url,
                payer_name,
                charge_to_prepaid: prepaid,
                payment_channel: channel,
                expiry_date,
                expiry_days,
                enable_corporate_fpx: enable,
                charge_corporate_fpx: charge,
                email_content,
                split_payment_args: split_args,
                split_payment: split,
                ..BillRequest::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_omit_empty_fields_present_iff_set(request in arb_request()) {
        let fields = encode(&request).expect("bill request must encode");

        for name in OMIT_WHEN_EMPTY {
            match omitted_value(&request, name) {
                Some(value) => {
                    prop_assert_eq!(fields.get(name), Some(&value), "{} missing", name);
                }
                None => {
                    prop_assert!(!fields.contains_key(name), "{} should be omitted", name);
                }
            }
        }
    }

    #[test]
    fn test_unmarked_fields_always_present(request in arb_request()) {
        let fields = encode(&request).expect("bill request must encode");

        for name in ALWAYS_PRESENT {
            prop_assert!(fields.contains_key(name), "{} missing", name);
        }
        prop_assert_eq!(fields.get("billAmount"), Some(&request.amount.to_string()));
    }

    #[test]
    fn test_payer_info_survives_encoding(
        name in "[A-Za-z ]{0,20}",
        phone in "[0-9]{0,12}",
        email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
    ) {
        let request = BillRequest::new("cat", "Title", "", 100)
            .with_options([BillOption::payer_info(name.clone(), phone.clone(), email.clone())]);
        let fields = encode(&request).expect("bill request must encode");

        prop_assert_eq!(fields.get("billPayorInfo").map(String::as_str), Some("1"));
        prop_assert_eq!(fields.get("billPhone"), Some(&phone));
        prop_assert_eq!(fields.get("billEmail"), Some(&email));
        if name.is_empty() {
            prop_assert!(!fields.contains_key("billTo"));
        } else {
            prop_assert_eq!(fields.get("billTo"), Some(&name));
        }
    }
}
